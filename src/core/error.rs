//! Error taxonomy for the request pipeline. Every failure ends the
//! current request only; nothing is retried automatically.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A remote event that matched an edit/delete target. Shown to the
/// user so they can pick one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub summary: String,
    /// RFC 3339 start time of the candidate event
    pub start: String,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The model's output could not be mapped to a scheduling intent
    #[error("Could not interpret request: {0}")]
    Parse(String),

    /// Zero or multiple remote events matched an edit/delete target
    #[error("Ambiguous event reference \"{target}\" ({} matching event(s))", .candidates.len())]
    Ambiguous {
        target: String,
        candidates: Vec<Candidate>,
    },

    /// The calendar API call failed
    #[error("Calendar request failed: {0}")]
    Remote(String),

    /// Expired or missing credential
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(err.to_string())
    }
}
