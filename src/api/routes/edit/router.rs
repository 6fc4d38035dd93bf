//! Router for the edit API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json, routing::post};
use chrono::Utc;

use super::public;
use crate::api::state::AppState;
use crate::calendar::{CalendarAdapter, Outcome};
use crate::core::Error;
use crate::google::access_token_for;
use crate::intent::{Operation, extract_intent};

type SharedState = Arc<RwLock<AppState>>;

/// Interpret an edit request and apply it. When the target matches
/// zero or several events the response is a 409 carrying the
/// candidates; the client resubmits with an `event_id` once the user
/// has picked one.
async fn edit_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::EditRequest>,
) -> Result<Json<public::EditResponse>, crate::api::public::ApiError> {
    let (db, config) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (shared_state.db.clone(), shared_state.config.clone())
    };

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

    if !matches!(intent.operation, Operation::Update | Operation::Delete) {
        return Err(Error::Parse(
            "not an edit request; use the schedule or calendar endpoints".to_string(),
        )
        .into());
    }

    let access_token = access_token_for(&db, &config, &payload.email).await?;
    let adapter = CalendarAdapter::new(&config, access_token);

    let outcome = match &payload.event_id {
        Some(event_id) => adapter.apply_to_event(&intent, event_id).await?,
        None => adapter.apply(&intent, now.fixed_offset()).await?,
    };

    let response = match outcome {
        Outcome::Updated(event) => public::EditResponse {
            action: "updated".to_string(),
            id: event.id.clone().unwrap_or_default(),
            summary: event.summary_or_untitled(),
            html_link: event.html_link,
        },
        Outcome::Deleted { id, summary } => public::EditResponse {
            action: "deleted".to_string(),
            id,
            summary,
            html_link: None,
        },
        _ => {
            return Err(Error::Remote("unexpected calendar response".to_string()).into());
        }
    };

    Ok(Json(response))
}

/// Create the edit router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(edit_handler))
}
