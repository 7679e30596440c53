use ::lazy_regex::{lazy_regex, Lazy, Regex};
use scraper::{ElementRef, Html, Node, Selector};

use super::model::*;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed result row #{row}: got {got} cells (expected 7 or 8)")]
    MalformedRow { row: usize, got: usize },

    #[error("Malformed diff table: got {got} cells (expected 2)")]
    MalformedDiffTable { got: usize },
}

const RESULT_ID: &str = "#result";
const INFO_ID: &str = "#infofile";
const COMPILER_OUTPUT_ID: &str = "#compileroutput";
const ACCEPTED_ROW_CLASS: &str = "testacc";
const TRACE_CLASS: &str = "trace";

/// Columns at the end of every result row that only carry judge metadata.
const HIDDEN_TRAILING_CELLS: usize = 3;

const BLOCK_ELEMENTS: &[&str] = &[
    "div", "p", "pre", "table", "tr", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

static RE_NEWLINES: Lazy<Regex> = lazy_regex!(r"\n+");
static RE_WHITESPACES: Lazy<Regex> = lazy_regex!(r"\s+");

fn selector(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

fn first_class<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("class")?.split_whitespace().next()
}

fn inner_text(el: ElementRef) -> String {
    el.text().collect()
}

/// Parses a status page on which judging has finished.
///
/// The page escapes part of its markup, so entities are decoded before the
/// document is parsed. Missing sections leave the corresponding fields empty.
pub fn parse_verdict(page: &str) -> Result<Verdict> {
    let decoded = html_escape::decode_html_entities(page);
    let doc = Html::parse_document(&decoded);

    let mut verdict = Verdict::default();

    if let Some(result) = doc.select(&selector(RESULT_ID)).next() {
        verdict.tests = parse_test_rows(result)?;
        if verdict.tests.is_empty() {
            verdict.result_text = Some(inner_text(result));
        }
    }

    if let Some(info) = doc.select(&selector(INFO_ID)).next() {
        verdict.info = Some(parse_info_section(info)?);
    }

    Ok(verdict)
}

fn parse_test_rows(container: ElementRef) -> Result<Vec<TestResult>> {
    let rows: Vec<_> = container.select(&selector("tr")).collect();
    if rows.len() <= 2 {
        return Ok(Vec::new());
    }
    // first: header, last: footer
    rows[1..rows.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &tr)| parse_test_row(i + 1, tr))
        .collect()
}

fn parse_test_row(ord: usize, tr: ElementRef) -> Result<TestResult> {
    let mut cells: Vec<_> = tr
        .select(&selector("td"))
        .map(|td| inner_text(td).trim().to_owned())
        .collect();
    let got = cells.len();
    cells.truncate(got.saturating_sub(HIDDEN_TRAILING_CELLS));

    let passed = first_class(&tr) == Some(ACCEPTED_ROW_CLASS);

    let (name, label, notes, score, time) = match <[String; 5]>::try_from(cells) {
        Ok([name, label, notes, score, time]) => (name, label, Some(notes), score, time),
        Err(cells) => match <[String; 4]>::try_from(cells) {
            Ok([name, label, score, time]) => (name, label, None, score, time),
            Err(_) => return Err(ParseError::MalformedRow { row: ord, got }),
        },
    };
    Ok(TestResult {
        name,
        label,
        notes,
        score,
        time,
        passed,
    })
}

fn parse_info_section(info: ElementRef) -> Result<InfoSection> {
    let compiler_output = info
        .select(&selector(COMPILER_OUTPUT_ID))
        .next()
        .map(inner_text);

    let mut blocks = Vec::new();
    for child in info.children().filter_map(ElementRef::wrap) {
        if child.value().name() == "table" {
            blocks.push(InfoBlock::Diff(parse_diff_table(child)?));
        } else if first_class(&child) == Some(TRACE_CLASS) {
            blocks.push(InfoBlock::Trace(trace_to_plain_text(child)));
        }
    }

    Ok(InfoSection {
        compiler_output,
        blocks,
    })
}

fn parse_diff_table(table: ElementRef) -> Result<DiffTable> {
    let cells: Vec<_> = table.select(&selector("td")).collect();
    let [actual, expected, ..] = cells.as_slice() else {
        return Err(ParseError::MalformedDiffTable { got: cells.len() })
    };
    let headers = table
        .select(&selector("th"))
        .map(|th| inner_text(th).trim().to_owned())
        .collect();

    Ok(DiffTable {
        headers,
        actual_lines: split_lines(&inner_text(*actual)),
        expected_lines: split_lines(&inner_text(*expected)),
    })
}

/// Splits into lines, dropping one trailing empty line.
fn split_lines(s: &str) -> Vec<String> {
    let mut lines: Vec<String> = s.lines().map(str::to_owned).collect();
    if lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn trace_to_plain_text(el: ElementRef) -> String {
    let mut buf = String::new();
    push_plain_text(el, &mut buf, false);

    let trimmed: Vec<_> = buf.lines().map(str::trim_end).collect();
    let joined = trimmed.join("\n");
    RE_NEWLINES
        .replace_all(joined.trim_matches('\n'), "\n")
        .into_owned()
}

/// Text outside `<pre>` is reflowed: whitespace runs become one space and
/// lines carry no leading blanks. `<pre>` text is copied as is.
fn push_plain_text(el: ElementRef, buf: &mut String, in_pre: bool) {
    for node in el.children() {
        match node.value() {
            Node::Text(text) if in_pre => buf.push_str(text),
            Node::Text(text) => push_reflowed(buf, text),
            Node::Element(e) if e.name() == "br" => buf.push('\n'),
            Node::Element(e) => {
                let Some(child) = ElementRef::wrap(node) else {
                    continue
                };
                let is_block = BLOCK_ELEMENTS.contains(&e.name());
                if is_block {
                    buf.push('\n');
                }
                push_plain_text(child, buf, in_pre || e.name() == "pre");
                if is_block {
                    buf.push('\n');
                }
            }
            _ => (),
        }
    }
}

fn push_reflowed(buf: &mut String, text: &str) {
    let collapsed = RE_WHITESPACES.replace_all(text, " ");
    let at_gap = buf.is_empty() || buf.ends_with('\n') || buf.ends_with(' ');
    if at_gap {
        buf.push_str(collapsed.trim_start_matches(' '));
    } else {
        buf.push_str(&collapsed);
    }
}
