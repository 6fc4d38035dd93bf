//! API routes module

pub mod calendar;
pub mod edit;
pub mod schedule;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Interpret and confirm new events
        .nest("/schedule", schedule::router())
        // Reschedule, rename, or cancel existing events
        .nest("/edit", edit::router())
        // Upcoming events and usage stats
        .nest("/calendar", calendar::router())
}
