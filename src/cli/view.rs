use anyhow::Result;
use chrono::Utc;
use itertools::Itertools;

use crate::calendar::stats;
use crate::core::AppConfig;

pub async fn run(show_stats: bool) -> Result<()> {
    let config = AppConfig::default();
    let now = Utc::now().with_timezone(&config.tz());

    let adapter = super::authorized_adapter(&config).await?;
    let events = adapter.upcoming(now.fixed_offset()).await?;

    if events.is_empty() {
        println!("No upcoming events found");
        return Ok(());
    }

    println!("Upcoming events ({}):", config.timezone);
    for event in &events {
        match event.start_time() {
            Some(start) => println!(
                "  {} at {}",
                event.summary_or_untitled(),
                start.format("%I:%M %p on %B %d, %Y")
            ),
            None => println!("  {} (all day)", event.summary_or_untitled()),
        }
    }

    if show_stats {
        let stats = stats::analyze(&events);
        println!("\nTotal events: {}", stats.total_events);
        if !stats.busy_hours.is_empty() {
            println!(
                "Busiest hours: {}",
                stats
                    .busy_hours
                    .iter()
                    .map(|(hour, count)| format!("{}:00 ({} events)", hour, count))
                    .join(", ")
            );
        }
        if !stats.events_per_weekday.is_empty() {
            println!(
                "Events per weekday: {}",
                stats
                    .events_per_weekday
                    .iter()
                    .map(|(day, count)| format!("{} {}", day, count))
                    .join(", ")
            );
        }
        if let Some(avg) = stats.avg_duration_minutes {
            println!("Average duration: {:.0} minutes", avg);
        }
    }

    Ok(())
}
