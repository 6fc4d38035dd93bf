use anyhow::{Result, bail};
use chrono::Utc;
use itertools::Itertools;
use rustyline::DefaultEditor;

use crate::calendar::Outcome;
use crate::core::AppConfig;
use crate::intent::{Operation, SchedulingIntent, extract_intent};

pub async fn run(text: &str) -> Result<()> {
    let config = AppConfig::default();
    let now = Utc::now().with_timezone(&config.tz());

    let intent = extract_intent(
        text,
        now,
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .await?;

    if intent.operation != Operation::Create {
        bail!("That doesn't look like a new event. Try `chronosage edit` or `chronosage view`.");
    }

    print_intent(&intent, &config.timezone);

    let mut rl = DefaultEditor::new().expect("Editor failed");
    let line = rl.readline("Add to calendar? (y/n) ")?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Discarded.");
        return Ok(());
    }

    let adapter = super::authorized_adapter(&config).await?;
    if let Outcome::Created(event) = adapter.apply(&intent, now.fixed_offset()).await? {
        match event.html_link {
            Some(link) => println!("Event created successfully! View it here: {}", link),
            None => println!("Event created successfully!"),
        }
    }

    Ok(())
}

fn print_intent(intent: &SchedulingIntent, timezone: &str) {
    println!("Interpreted event details ({}):", timezone);
    println!("  Title: {}", intent.title);
    if let Some(start) = intent.start {
        println!("  Date: {}", start.format("%B %d, %Y"));
        println!("  Time: {}", start.format("%I:%M %p"));
    }
    println!(
        "  Duration: {} minutes",
        intent.duration_minutes.unwrap_or(60)
    );
    println!(
        "  Description: {}",
        intent
            .description
            .clone()
            .unwrap_or_else(|| "No description provided".to_string())
    );
    if !intent.attendees.is_empty() {
        println!("  Attendees: {}", intent.attendees.iter().join(", "));
    }
}
