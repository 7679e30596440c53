use std::io::{self, Write};

use colored::{Color, Colorize as _};

const COLUMN_SEP: &str = "  ";

#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Plain-text table: header row, dashed rule, then rows.
///
/// Columns are padded to their widest cell. Colors wrap only the cell text, so
/// padding stays uncolored and alignment is unaffected by escape codes.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    right_aligned: Vec<usize>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            right_aligned: Vec::new(),
        }
    }

    /// Right-aligns column `col`, header included.
    pub fn align_right(mut self, col: usize) -> Self {
        self.right_aligned.push(col);
        self
    }

    pub fn push_row(&mut self, row: impl IntoIterator<Item = Cell>) {
        self.rows.push(row.into_iter().collect());
    }

    fn column_widths(&self) -> Vec<usize> {
        let num_cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain([self.headers.len()])
            .max()
            .unwrap_or(0);
        (0..num_cols)
            .map(|i| {
                let header = self.headers.get(i).map_or(0, |h| h.chars().count());
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i).map(Cell::width))
                    .chain([header])
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        let empty = Cell::new("");

        let header_cells: Vec<_> = widths
            .iter()
            .enumerate()
            .map(|(i, _)| Cell::new(self.headers.get(i).map_or("", String::as_str)))
            .collect();
        write_line(w, &header_cells.iter().collect::<Vec<_>>(), &widths, &self.right_aligned)?;

        let rule: Vec<_> = widths.iter().map(|&n| "-".repeat(n)).collect();
        writeln!(w, "{}", rule.join(COLUMN_SEP))?;

        for row in &self.rows {
            let cells: Vec<_> = (0..widths.len())
                .map(|i| row.get(i).unwrap_or(&empty))
                .collect();
            write_line(w, &cells, &widths, &self.right_aligned)?;
        }
        Ok(())
    }
}

fn write_line<W: Write + ?Sized>(
    w: &mut W,
    cells: &[&Cell],
    widths: &[usize],
    right_aligned: &[usize],
) -> io::Result<()> {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_SEP);
        }
        let padding = " ".repeat(width - cell.width());
        let text = match cell.color {
            Some(color) if !cell.text.is_empty() => cell.text.color(color).to_string(),
            _ => cell.text.clone(),
        };
        if right_aligned.contains(&i) {
            line.push_str(&padding);
            line.push_str(&text);
        } else {
            line.push_str(&text);
            line.push_str(&padding);
        }
    }
    writeln!(w, "{}", line.trim_end())
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(t: &Table) -> String {
        let mut buf = Vec::new();
        t.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut t = Table::new(["Test", "Wynik"]);
        t.push_row([Cell::new("T10"), Cell::new("Zła odpowiedź")]);
        t.push_row([Cell::new("T2"), Cell::new("OK")]);

        assert_eq!(
            render(&t),
            "Test  Wynik\n\
             ----  -------------\n\
             T10   Zła odpowiedź\n\
             T2    OK\n"
        );
    }

    #[test]
    fn short_rows_render_empty_cells() {
        let mut t = Table::new(["A", "B"]);
        t.push_row([Cell::new(""), Cell::new("4")]);
        t.push_row([Cell::new("x")]);

        assert_eq!(render(&t), "A  B\n-  -\n   4\nx\n");
    }

    #[test]
    fn right_aligned_columns_pad_on_the_left() {
        let mut t = Table::new(["Test", "Pkt", "Czas [s]"]).align_right(1).align_right(2);
        t.push_row([Cell::new("T1"), Cell::new("10"), Cell::new("0.5")]);
        t.push_row([Cell::new("T2"), Cell::new("0"), Cell::new("12.25")]);

        assert_eq!(
            render(&t),
            "Test  Pkt  Czas [s]\n\
             ----  ---  --------\n\
             T1     10       0.5\n\
             T2      0     12.25\n"
        );
    }
}
