//! Router for the schedule API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json, routing::post};
use chrono::Utc;

use super::public;
use crate::api::state::AppState;
use crate::calendar::{CalendarAdapter, Outcome};
use crate::core::Error;
use crate::google::access_token_for;
use crate::google::gcal::EventDateTime;
use crate::intent::{Operation, extract_intent};

type SharedState = Arc<RwLock<AppState>>;

/// Interpret a free-text scheduling request. Nothing is sent to the
/// calendar until the intent comes back through the confirm endpoint.
async fn schedule_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ScheduleRequest>,
) -> Result<Json<public::ScheduleResponse>, crate::api::public::ApiError> {
    let config = state.read().expect("Unable to read shared state").config.clone();
    let tz = config.tz();
    let now = match payload.reference_time {
        Some(reference) => reference.with_timezone(&tz),
        None => Utc::now().with_timezone(&tz),
    };

    let intent = extract_intent(
        &payload.text,
        now,
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .await?;

    Ok(Json(public::ScheduleResponse { intent }))
}

/// Create the confirmed event on the remote calendar
async fn confirm_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ConfirmRequest>,
) -> Result<Json<public::CreatedResponse>, crate::api::public::ApiError> {
    if payload.intent.operation != Operation::Create {
        return Err(Error::Parse("only create intents can be confirmed".to_string()).into());
    }

    let (db, config) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (shared_state.db.clone(), shared_state.config.clone())
    };

    let access_token = access_token_for(&db, &config, &payload.email).await?;
    let adapter = CalendarAdapter::new(&config, access_token);
    let now = Utc::now().with_timezone(&config.tz()).fixed_offset();

    match adapter.apply(&payload.intent, now).await? {
        Outcome::Created(event) => Ok(Json(public::CreatedResponse {
            id: event.id.clone().unwrap_or_default(),
            summary: event.summary_or_untitled(),
            start: event.start.as_ref().and_then(EventDateTime::raw).map(String::from),
            end: event.end.as_ref().and_then(EventDateTime::raw).map(String::from),
            html_link: event.html_link,
        })),
        _ => Err(Error::Remote("unexpected calendar response".to_string()).into()),
    }
}

/// Create the schedule router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(schedule_handler))
        .route("/confirm", post(confirm_handler))
}
