//! Usage pattern summary over a window of calendar events

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Timelike};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::google::gcal::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarStats {
    pub total_events: usize,
    /// The three busiest hours of the day as (hour, event count)
    pub busy_hours: Vec<(u32, usize)>,
    pub events_per_weekday: BTreeMap<String, usize>,
    pub avg_duration_minutes: Option<f64>,
}

pub fn analyze(events: &[Event]) -> CalendarStats {
    let starts: Vec<_> = events.iter().filter_map(|event| event.start_time()).collect();

    let mut hour_counts: HashMap<u32, usize> = HashMap::new();
    let mut weekday_counts: BTreeMap<String, usize> = BTreeMap::new();
    for start in &starts {
        *hour_counts.entry(start.hour()).or_default() += 1;
        *weekday_counts.entry(start.weekday().to_string()).or_default() += 1;
    }

    let busy_hours = hour_counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .take(3)
        .collect();

    let durations: Vec<f64> = events
        .iter()
        .filter_map(|event| {
            let start = event.start_time()?;
            let end = event.end_time()?;
            Some((end - start).num_seconds() as f64 / 60.0)
        })
        .collect();
    let avg_duration_minutes = if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    CalendarStats {
        total_events: events.len(),
        busy_hours,
        events_per_weekday: weekday_counts,
        avg_duration_minutes,
    }
}
