use reqwest::StatusCode;

use crate::model::ProblemId;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Wrong username or password")]
    WrongCredential,

    #[error("STOS did not accept the files submitted to problem {problem_id}")]
    UploadRejected {
        problem_id: ProblemId,
        /// Raw response page, kept for diagnosis.
        body: String,
    },

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Unexpected response code '{got}' (expected '{expected}') while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        expected: StatusCode,
        requested_url: String,
    },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True when the judge could not be reached at all.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
