//! Translation of free-text scheduling requests into structured intents

pub mod attendees;
pub mod extractor;
pub mod prompt;
pub mod resolve;

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::Error;

pub use extractor::extract_intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Query,
}

/// Structured representation of a user's scheduling request. Produced
/// transiently per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingIntent {
    pub operation: Operation,
    #[serde(default)]
    pub title: String,
    pub start: Option<DateTime<FixedOffset>>,
    /// True when the request carried a date but no clock time. The
    /// time component of `start` is a placeholder in that case.
    #[serde(default)]
    pub date_only: bool,
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub attendees: BTreeSet<String>,
    pub description: Option<String>,
    /// Free-text reference identifying an existing event, resolved by
    /// fuzzy title/description match for update and delete
    pub target: Option<String>,
}

impl SchedulingIntent {
    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        match (self.start, self.duration_minutes) {
            (Some(start), Some(minutes)) => Some(start + Duration::minutes(minutes)),
            _ => None,
        }
    }

    /// Check the intent is actionable before any remote call is made
    pub fn validate(&self) -> Result<(), Error> {
        match self.operation {
            Operation::Create => {
                if self.title.is_empty() {
                    return Err(Error::Parse("a new event needs a title".to_string()));
                }
                if self.start.is_none() || self.date_only {
                    return Err(Error::Parse(
                        "a new event needs a date and a time".to_string(),
                    ));
                }
            }
            Operation::Update | Operation::Delete => {
                if self.target.as_deref().unwrap_or("").trim().is_empty() {
                    return Err(Error::Parse(
                        "could not tell which event to modify".to_string(),
                    ));
                }
            }
            Operation::Query => {}
        }
        Ok(())
    }
}
