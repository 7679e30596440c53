use std::fmt;

use serde::{Deserialize, Serialize};

pub use reqwest::Url;

/// Problem identifier assigned by STOS (e.g. `365`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(pub String);

impl ProblemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProblemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProblemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Phrases STOS prints on a status page while a submission is still being judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumIter)]
pub enum TransientMarker {
    #[strum(serialize = "przetwarzane")]
    Processing,
    #[strum(serialize = "oczekuje")]
    Pending,
    #[strum(serialize = "kolejce")]
    Queued,
}

impl TransientMarker {
    /// Returns the first marker found in `page`.
    pub fn find_in(page: &str) -> Option<Self> {
        use strum::IntoEnumIterator as _;
        Self::iter().find(|m| page.contains(m.as_ref()))
    }
}
