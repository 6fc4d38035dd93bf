use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rustyline::DefaultEditor;

use crate::calendar::Outcome;
use crate::core::{AppConfig, Candidate, Error};
use crate::intent::{Operation, extract_intent};

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

    if !matches!(intent.operation, Operation::Update | Operation::Delete) {
        bail!(
            "That doesn't look like an edit. Try `chronosage schedule` or `chronosage view`."
        );
    }

    let adapter = super::authorized_adapter(&config).await?;
    match adapter.apply(&intent, now.fixed_offset()).await {
        Ok(outcome) => report(outcome),
        Err(Error::Ambiguous { target, candidates }) => {
            if candidates.is_empty() {
                println!("No matching events found for \"{}\".", target);
                return Ok(());
            }

            println!("Multiple matching events found:");
            for (i, candidate) in candidates.iter().enumerate() {
                println!("{}. {} on {}", i + 1, candidate.summary, start_of(candidate));
            }

            let mut rl = DefaultEditor::new().expect("Editor failed");
            let line = rl.readline("Select the event to modify (number): ")?;
            let chosen = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| candidates.get(n.checked_sub(1)?));
            let Some(candidate) = chosen else {
                bail!("Invalid selection");
            };

            let outcome = adapter.apply_to_event(&intent, &candidate.id).await?;
            report(outcome);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Updated(event) => match event.html_link {
            Some(link) => println!("Event updated successfully! View it here: {}", link),
            None => println!("Event updated successfully!"),
        },
        Outcome::Deleted { summary, .. } => println!("Successfully cancelled: {}", summary),
        _ => {}
    }
}

fn start_of(candidate: &Candidate) -> String {
    DateTime::parse_from_rfc3339(&candidate.start)
        .map(|start| start.format("%B %d at %I:%M %p").to_string())
        .unwrap_or_else(|_| candidate.start.clone())
}
