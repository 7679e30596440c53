pub mod table;

use std::io::{self, Write};

use crate::{
    style::ColorTheme as _,
    verdict::{InfoBlock, InfoSection, Verdict},
};
use table::{Cell, Table};

pub const RESULTS_HEADER: &str = "**** Wyniki ****";
pub const INFO_HEADER: &str = "**** Dodatkowe informacje ****";

pub fn print_verdict(verdict: &Verdict) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_verdict(&mut lock, verdict)?;
    lock.flush()
}

/// Writes the results table (or the raw result text), then the supplementary section.
/// An empty verdict writes nothing.
pub fn write_verdict<W: Write + ?Sized>(w: &mut W, verdict: &Verdict) -> io::Result<()> {
    if verdict.is_empty() {
        log::debug!("Status page holds neither results nor additional info");
        return Ok(());
    }
    write_results(w, verdict)?;
    if let Some(info) = &verdict.info {
        write_info(w, info)?;
    }
    Ok(())
}

fn write_results<W: Write + ?Sized>(w: &mut W, verdict: &Verdict) -> io::Result<()> {
    if verdict.tests.is_empty() {
        if let Some(text) = &verdict.result_text {
            writeln!(w, "{}\n", RESULTS_HEADER)?;
            writeln!(w, "{}\n", text)?;
        }
        return Ok(());
    }

    let with_notes = verdict.has_notes();
    let headers = if with_notes {
        vec!["Test", "Wynik", "Uwagi", "Punkty", "Czas [s]"]
    } else {
        vec!["Test", "Wynik", "Punkty", "Czas [s]"]
    };
    // score and time
    let num_cols = headers.len();
    let mut table = Table::new(headers)
        .align_right(num_cols - 2)
        .align_right(num_cols - 1);

    for t in &verdict.tests {
        let color = t.style().color();
        let mut cells = vec![t.name.as_str(), t.label.as_str()];
        if with_notes {
            cells.push(t.notes.as_deref().unwrap_or(""));
        }
        cells.extend([t.score.as_str(), t.time.as_str()]);
        table.push_row(cells.into_iter().map(|s| Cell::new(s).color(color)));
    }

    writeln!(w, "{}\n", RESULTS_HEADER)?;
    table.write_to(w)?;
    writeln!(w)
}

fn write_info<W: Write + ?Sized>(w: &mut W, info: &InfoSection) -> io::Result<()> {
    writeln!(w, "{}", INFO_HEADER)?;

    if let Some(output) = &info.compiler_output {
        writeln!(w, "{}", output)?;
    }

    for block in &info.blocks {
        match block {
            InfoBlock::Diff(diff) => {
                let mut table = Table::new(&diff.headers);
                for (actual, expected) in diff.rows() {
                    table.push_row([Cell::new(actual), Cell::new(expected)]);
                }
                table.write_to(w)?;
            }
            InfoBlock::Trace(text) => writeln!(w, "{}", text)?,
        }
    }
    Ok(())
}
