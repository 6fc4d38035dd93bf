//! Router for the calendar API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;
use chrono::Utc;

use super::public;
use crate::api::state::AppState;
use crate::calendar::stats;
use crate::core::AppConfig;
use crate::google::access_token_for;
use crate::google::gcal::{Event, EventDateTime, list_events};

type SharedState = Arc<RwLock<AppState>>;

async fn upcoming_events(
    state: &SharedState,
    params: &public::CalendarQuery,
) -> Result<Vec<Event>, crate::api::public::ApiError> {
    let (db, config) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (shared_state.db.clone(), shared_state.config.clone())
    };
    let access_token = access_token_for(&db, &config, &params.email).await?;

    let AppConfig {
        google_api_hostname,
        max_days_ahead,
        max_results,
        ..
    } = &config;

    // Default to the configured window if not specified
    let days_ahead = params.days_ahead.unwrap_or(*max_days_ahead);

    // Default to primary calendar if not specified
    let calendar_id = params
        .calendar_id
        .clone()
        .unwrap_or_else(|| config.calendar_id.clone());

    // Get the current time and calculate the end time
    let now = Utc::now().with_timezone(&config.tz()).fixed_offset();
    let end_time = now + chrono::Duration::days(days_ahead);

    let events = list_events(
        google_api_hostname,
        &access_token,
        &calendar_id,
        now,
        end_time,
        *max_results,
    )
    .await?;
    Ok(events)
}

async fn calendar_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::CalendarQuery>,
) -> Result<Json<Vec<public::CalendarResponse>>, crate::api::public::ApiError> {
    let events = upcoming_events(&state, &params).await?;

    // Transform events to a simpler format for the API response
    let resp = events
        .into_iter()
        .map(|event| {
            let summary = event.summary_or_untitled();
            public::CalendarResponse {
                id: event.id.unwrap_or_default(),
                summary,
                start: event
                    .start
                    .as_ref()
                    .and_then(EventDateTime::raw)
                    .unwrap_or_default()
                    .to_string(),
                end: event
                    .end
                    .as_ref()
                    .and_then(EventDateTime::raw)
                    .unwrap_or_default()
                    .to_string(),
                attendees: event.attendees.map(|attendees| {
                    attendees
                        .into_iter()
                        .map(|attendee| public::CalendarAttendee {
                            email: attendee.email,
                            display_name: attendee.display_name,
                        })
                        .collect::<Vec<_>>()
                }),
            }
        })
        .collect();

    Ok(Json(resp))
}

/// Summarize usage patterns over the upcoming window
async fn stats_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::CalendarQuery>,
) -> Result<Json<public::CalendarStats>, crate::api::public::ApiError> {
    let events = upcoming_events(&state, &params).await?;
    Ok(Json(stats::analyze(&events)))
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(calendar_handler))
        .route("/stats", axum::routing::get(stats_handler))
}
