//! Google Calendar API client for listing, inserting, patching, and
//! deleting events

use chrono::{DateTime, FixedOffset};
use http::StatusCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Event structures from the Calendar API documentation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    // All-day events carry a date instead of a dateTime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.date_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    /// The raw wire value, whichever field carries it
    pub fn raw(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReminders {
    #[serde(rename = "useDefault")]
    pub use_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "htmlLink", skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
}

impl Event {
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.start.as_ref().and_then(EventDateTime::to_datetime)
    }

    pub fn end_time(&self) -> Option<DateTime<FixedOffset>> {
        self.end.as_ref().and_then(EventDateTime::to_datetime)
    }

    pub fn summary_or_untitled(&self) -> String {
        self.summary.clone().unwrap_or_else(|| "No title".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListEventsResponse {
    pub items: Option<Vec<Event>>,
}

fn events_url(api_hostname: &str, calendar_id: &str) -> String {
    format!(
        "{}/calendar/v3/calendars/{}/events",
        api_hostname.trim_end_matches('/'),
        urlencoding::encode(calendar_id)
    )
}

fn status_error(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Error::Auth(format!("{} ({})", status, body))
    } else {
        Error::Remote(format!("{} ({})", status, body))
    }
}

/// List events within a time range, expanded to single instances and
/// ordered by start time
pub async fn list_events(
    api_hostname: &str,
    access_token: &str,
    calendar_id: &str,
    time_min: DateTime<FixedOffset>,
    time_max: DateTime<FixedOffset>,
    max_results: usize,
) -> Result<Vec<Event>, Error> {
    let url = format!(
        "{}?timeMin={}&timeMax={}&singleEvents=true&orderBy=startTime&maxResults={}",
        events_url(api_hostname, calendar_id),
        urlencoding::encode(&time_min.to_rfc3339()),
        urlencoding::encode(&time_max.to_rfc3339()),
        max_results
    );
    let res = Client::new().get(&url).bearer_auth(access_token).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(status_error(status, &text));
    }
    let resp: ListEventsResponse = serde_json::from_str(&text)
        .map_err(|e| Error::Remote(format!("Unexpected list response: {}", e)))?;
    Ok(resp.items.unwrap_or_default())
}

/// Create a new event
pub async fn insert_event(
    api_hostname: &str,
    access_token: &str,
    calendar_id: &str,
    event: &Event,
) -> Result<Event, Error> {
    let url = events_url(api_hostname, calendar_id);
    let res = Client::new()
        .post(&url)
        .bearer_auth(access_token)
        .json(event)
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(status_error(status, &text));
    }
    let created = serde_json::from_str(&text)
        .map_err(|e| Error::Remote(format!("Unexpected insert response: {}", e)))?;
    Ok(created)
}

/// Fetch a single event by id
pub async fn get_event(
    api_hostname: &str,
    access_token: &str,
    calendar_id: &str,
    event_id: &str,
) -> Result<Event, Error> {
    let url = format!(
        "{}/{}",
        events_url(api_hostname, calendar_id),
        urlencoding::encode(event_id)
    );
    let res = Client::new().get(&url).bearer_auth(access_token).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(status_error(status, &text));
    }
    let event = serde_json::from_str(&text)
        .map_err(|e| Error::Remote(format!("Unexpected event response: {}", e)))?;
    Ok(event)
}

/// Patch fields of an existing event. Only the fields present in
/// `patch` are changed.
pub async fn patch_event(
    api_hostname: &str,
    access_token: &str,
    calendar_id: &str,
    event_id: &str,
    patch: &Event,
) -> Result<Event, Error> {
    let url = format!(
        "{}/{}",
        events_url(api_hostname, calendar_id),
        urlencoding::encode(event_id)
    );
    let res = Client::new()
        .patch(&url)
        .bearer_auth(access_token)
        .json(patch)
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(status_error(status, &text));
    }
    let updated = serde_json::from_str(&text)
        .map_err(|e| Error::Remote(format!("Unexpected patch response: {}", e)))?;
    Ok(updated)
}

/// Delete an event by id
pub async fn delete_event(
    api_hostname: &str,
    access_token: &str,
    calendar_id: &str,
    event_id: &str,
) -> Result<(), Error> {
    let url = format!(
        "{}/{}",
        events_url(api_hostname, calendar_id),
        urlencoding::encode(event_id)
    );
    let res = Client::new()
        .delete(&url)
        .bearer_auth(access_token)
        .send()
        .await?;
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(status_error(status, &text));
    }
    Ok(())
}
