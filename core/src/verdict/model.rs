/// Outcome of one grading run, as read from a STOS status page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub tests: Vec<TestResult>,

    /// Text of the result section when it holds no test rows.
    pub result_text: Option<String>,

    /// Supplementary section (compiler output, diffs, traces).
    pub info: Option<InfoSection>,
}

impl Verdict {
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.result_text.is_none() && self.info.is_none()
    }

    pub fn has_notes(&self) -> bool {
        self.tests.iter().any(|t| t.notes.is_some())
    }

    pub fn compiler_output(&self) -> Option<&str> {
        self.info.as_ref()?.compiler_output.as_deref()
    }

    /// First expected-vs-actual table of the supplementary section.
    pub fn trace_diff(&self) -> Option<&DiffTable> {
        self.info.as_ref()?.blocks.iter().find_map(|b| match b {
            InfoBlock::Diff(d) => Some(d),
            InfoBlock::Trace(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub label: String,
    pub notes: Option<String>,
    pub score: String,
    /// Execution time in seconds, as printed by the judge.
    pub time: String,
    pub passed: bool,
}

impl TestResult {
    pub fn style(&self) -> CellStyle {
        if self.passed {
            CellStyle::Accepted
        } else {
            CellStyle::Rejected
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSection {
    pub compiler_output: Option<String>,
    /// In the order they appear on the page.
    pub blocks: Vec<InfoBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoBlock {
    Diff(DiffTable),
    Trace(String),
}

/// Program output shown side by side with the expected answer.
///
/// `actual_lines` comes from the first column of the page, `expected_lines` from the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTable {
    pub headers: Vec<String>,
    pub actual_lines: Vec<String>,
    pub expected_lines: Vec<String>,
}

impl DiffTable {
    pub fn len(&self) -> usize {
        self.actual_lines.len().max(self.expected_lines.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pairs of (actual, expected); the shorter side is padded with `""`.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        (0..self.len()).map(move |i| {
            (
                line_at(&self.actual_lines, i),
                line_at(&self.expected_lines, i),
            )
        })
    }
}

fn line_at(lines: &[String], i: usize) -> &str {
    lines.get(i).map(String::as_str).unwrap_or("")
}
