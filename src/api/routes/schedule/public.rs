//! Public types for the schedule API
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::intent::SchedulingIntent;

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub text: String,
    /// Reference time relative dates resolve against. Defaults to the
    /// current time in the configured timezone.
    #[serde(default)]
    pub reference_time: Option<DateTime<FixedOffset>>,
}

/// The interpreted event, awaiting confirmation
#[derive(Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub intent: SchedulingIntent,
}

#[derive(Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub email: String,
    pub intent: SchedulingIntent,
}

#[derive(Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    pub summary: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub html_link: Option<String>,
}
