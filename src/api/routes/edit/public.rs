//! Public types for the edit API
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct EditRequest {
    pub text: String,
    pub email: String,
    /// Chosen event id after a disambiguation round
    #[serde(default)]
    pub event_id: Option<String>,
    /// Reference time relative dates resolve against. Defaults to the
    /// current time in the configured timezone.
    #[serde(default)]
    pub reference_time: Option<DateTime<FixedOffset>>,
}

#[derive(Serialize, Deserialize)]
pub struct EditResponse {
    /// What happened: "updated" or "deleted"
    pub action: String,
    pub id: String,
    pub summary: String,
    pub html_link: Option<String>,
}
