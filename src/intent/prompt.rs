//! Extraction prompts using Handlebars for templating. Handlebars
//! adds additional security controls since it can't do much out of
//! the box without registering your own helpers, which is ideal when
//! the rendered context includes untrusted user text.

use std::fmt;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use handlebars::Handlebars;
use serde_json::json;

#[derive(Debug)]
pub enum Prompt {
    ScheduleRequest,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const SCHEDULE_REQUEST_PROMPT: &str = r"
You are a calendar assistant for the {{timezone}} timezone. The current date and time is {{current_datetime}} ({{weekday}}).

Convert the user's request into a structured calendar operation by calling the schedule_event function.

- operation is one of: create (new event), update (change an existing event), delete (cancel an existing event), query (show upcoming events).
- Dates may be absolute (YYYY-MM-DD) or relative to the current date: today, tomorrow, a weekday name, next <weekday>, in N days, in N weeks, in N hours, in N minutes.
- Times are 24-hour HH:MM or 12-hour like 2pm or 2:30pm. Always include a time when the user gives one.
- duration_minutes is the event length in minutes.
- attendees is a comma-separated list of people mentioned as participants.
- For update and delete, set target to the words identifying the existing event (for example the title the user referred to). Put any new values in the other fields.
";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(&Prompt::ScheduleRequest.to_string(), SCHEDULE_REQUEST_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Render the extraction system prompt against the reference time
pub fn render_schedule_prompt(now: &DateTime<Tz>) -> String {
    templates()
        .render(
            &Prompt::ScheduleRequest.to_string(),
            &json!({
                "timezone": now.timezone().to_string(),
                "current_datetime": now.format("%Y-%m-%d %H:%M").to_string(),
                "weekday": now.weekday().to_string(),
            }),
        )
        .expect("Failed to render template")
}
