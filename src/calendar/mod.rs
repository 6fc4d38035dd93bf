//! Maps scheduling intents onto Google Calendar calls. One intent
//! becomes one remote call; remote failures pass through unmodified.

pub mod stats;

use chrono::{DateTime, Datelike, Duration, FixedOffset};
use regex::RegexBuilder;

use crate::core::{AppConfig, Candidate, Error};
use crate::google::gcal::{self, Event, EventAttendee, EventDateTime, EventReminders};
use crate::intent::{Operation, SchedulingIntent};

/// Fallback event length when the request didn't carry one
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// The remote calendar's answer to an applied intent
#[derive(Debug)]
pub enum Outcome {
    Created(Event),
    Updated(Event),
    Deleted { id: String, summary: String },
    Events(Vec<Event>),
}

pub struct CalendarAdapter {
    pub api_hostname: String,
    pub access_token: String,
    pub calendar_id: String,
    /// IANA timezone name stamped onto event times
    pub timezone: String,
    pub max_days_ahead: i64,
    pub max_results: usize,
}

impl CalendarAdapter {
    pub fn new(config: &AppConfig, access_token: String) -> Self {
        Self {
            api_hostname: config.google_api_hostname.clone(),
            access_token,
            calendar_id: config.calendar_id.clone(),
            timezone: config.timezone.clone(),
            max_days_ahead: config.max_days_ahead,
            max_results: config.max_results,
        }
    }

    /// Apply an intent with exactly one remote mutation or query. For
    /// update and delete the target must match exactly one upcoming
    /// event, otherwise the candidates come back as an ambiguity and
    /// nothing is changed.
    pub async fn apply(
        &self,
        intent: &SchedulingIntent,
        now: DateTime<FixedOffset>,
    ) -> Result<Outcome, Error> {
        intent.validate()?;

        match intent.operation {
            Operation::Create => {
                let draft = self.draft_event(intent)?;
                let created = gcal::insert_event(
                    &self.api_hostname,
                    &self.access_token,
                    &self.calendar_id,
                    &draft,
                )
                .await?;
                Ok(Outcome::Created(created))
            }
            Operation::Update | Operation::Delete => {
                let target = intent.target.clone().unwrap_or_default();
                let candidates = self.find_matching(&target, now).await?;
                match candidates.as_slice() {
                    [event] => {
                        let id = event.id.clone().unwrap_or_default();
                        self.apply_mutation(intent, &id, event).await
                    }
                    _ => Err(ambiguous(&target, &candidates)),
                }
            }
            Operation::Query => Ok(Outcome::Events(self.upcoming(now).await?)),
        }
    }

    /// Apply an update or delete against an explicitly chosen event,
    /// used after the user resolved an ambiguity
    pub async fn apply_to_event(
        &self,
        intent: &SchedulingIntent,
        event_id: &str,
    ) -> Result<Outcome, Error> {
        let event = gcal::get_event(
            &self.api_hostname,
            &self.access_token,
            &self.calendar_id,
            event_id,
        )
        .await?;
        self.apply_mutation(intent, event_id, &event).await
    }

    /// Upcoming events within the configured window
    pub async fn upcoming(&self, now: DateTime<FixedOffset>) -> Result<Vec<Event>, Error> {
        gcal::list_events(
            &self.api_hostname,
            &self.access_token,
            &self.calendar_id,
            now,
            now + Duration::days(self.max_days_ahead),
            self.max_results,
        )
        .await
    }

    async fn apply_mutation(
        &self,
        intent: &SchedulingIntent,
        event_id: &str,
        event: &Event,
    ) -> Result<Outcome, Error> {
        match intent.operation {
            Operation::Delete => {
                gcal::delete_event(
                    &self.api_hostname,
                    &self.access_token,
                    &self.calendar_id,
                    event_id,
                )
                .await?;
                Ok(Outcome::Deleted {
                    id: event_id.to_string(),
                    summary: event.summary_or_untitled(),
                })
            }
            Operation::Update => {
                let patch = self.patch_for(intent, event);
                let updated = gcal::patch_event(
                    &self.api_hostname,
                    &self.access_token,
                    &self.calendar_id,
                    event_id,
                    &patch,
                )
                .await?;
                Ok(Outcome::Updated(updated))
            }
            _ => Err(Error::Parse(
                "only update and delete can target an existing event".to_string(),
            )),
        }
    }

    /// Events in the upcoming window whose summary or description
    /// match the target text, case-insensitively
    async fn find_matching(
        &self,
        target: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Event>, Error> {
        let events = gcal::list_events(
            &self.api_hostname,
            &self.access_token,
            &self.calendar_id,
            now,
            now + Duration::days(self.max_days_ahead),
            self.max_results * 2,
        )
        .await?;

        let pattern = RegexBuilder::new(&regex::escape(target))
            .case_insensitive(true)
            .build()
            .unwrap();

        Ok(events
            .into_iter()
            .filter(|event| {
                pattern.is_match(event.summary.as_deref().unwrap_or(""))
                    || pattern.is_match(event.description.as_deref().unwrap_or(""))
            })
            .take(self.max_results)
            .collect())
    }

    fn draft_event(&self, intent: &SchedulingIntent) -> Result<Event, Error> {
        let start = intent
            .start
            .ok_or_else(|| Error::Parse("a new event needs a date and a time".to_string()))?;
        let end = intent
            .end()
            .unwrap_or(start + Duration::minutes(DEFAULT_DURATION_MINUTES));

        // Only addresses can be invited through the API. Plain names
        // stay in the intent for display.
        let attendees: Vec<EventAttendee> = intent
            .attendees
            .iter()
            .filter(|a| a.contains('@'))
            .map(|email| EventAttendee {
                email: email.clone(),
                display_name: None,
            })
            .collect();

        Ok(Event {
            summary: Some(intent.title.clone()),
            description: intent.description.clone(),
            start: Some(self.event_time(start)),
            end: Some(self.event_time(end)),
            attendees: (!attendees.is_empty()).then_some(attendees),
            reminders: Some(EventReminders { use_default: true }),
            ..Default::default()
        })
    }

    /// Build the patch body for an update. Only fields the intent
    /// carries are included. A new start keeps the event's previous
    /// duration unless a new one was given, and a date-only change
    /// keeps the event's previous time of day.
    fn patch_for(&self, intent: &SchedulingIntent, existing: &Event) -> Event {
        let mut patch = Event::default();

        if !intent.title.is_empty() {
            patch.summary = Some(intent.title.clone());
        }
        if intent.description.is_some() {
            patch.description = intent.description.clone();
        }

        let old_duration = existing
            .start_time()
            .zip(existing.end_time())
            .map(|(start, end)| end - start)
            .unwrap_or(Duration::minutes(DEFAULT_DURATION_MINUTES));

        if let Some(new_start) = intent.start {
            let start = if intent.date_only {
                shift_date(existing.start_time(), new_start)
            } else {
                new_start
            };
            let duration = intent
                .duration_minutes
                .map(Duration::minutes)
                .unwrap_or(old_duration);
            patch.start = Some(self.event_time(start));
            patch.end = Some(self.event_time(start + duration));
        } else if let Some(minutes) = intent.duration_minutes {
            if let Some(start) = existing.start_time() {
                patch.end = Some(self.event_time(start + Duration::minutes(minutes)));
            }
        }

        patch
    }

    fn event_time(&self, at: DateTime<FixedOffset>) -> EventDateTime {
        EventDateTime {
            date_time: Some(at.to_rfc3339()),
            date: None,
            time_zone: Some(self.timezone.clone()),
        }
    }
}

/// Move an existing start to a new calendar date, keeping its time of
/// day
fn shift_date(
    existing: Option<DateTime<FixedOffset>>,
    new_date: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let Some(old) = existing else {
        return new_date;
    };
    old.with_year(new_date.year())
        .and_then(|dt| dt.with_month(new_date.month()))
        .and_then(|dt| dt.with_day(new_date.day()))
        .unwrap_or(new_date)
}

fn ambiguous(target: &str, candidates: &[Event]) -> Error {
    Error::Ambiguous {
        target: target.to_string(),
        candidates: candidates
            .iter()
            .map(|event| Candidate {
                id: event.id.clone().unwrap_or_default(),
                summary: event.summary_or_untitled(),
                start: event
                    .start
                    .as_ref()
                    .and_then(EventDateTime::raw)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect(),
    }
}
