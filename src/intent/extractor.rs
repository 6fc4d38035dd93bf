//! Intent extraction via a single forced function call against an
//! OpenAI-compatible completion API

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::intent::{Operation, SchedulingIntent, attendees, prompt, resolve};
use crate::openai::{
    Function, Message, Parameters, Property, Role, Tool, ToolType, completion,
    tool_call_arguments,
};

const SCHEDULE_EVENT_FN: &str = "schedule_event";

#[derive(Serialize)]
pub struct ScheduleEventProps {
    pub operation: Property,
    pub title: Property,
    pub date: Property,
    pub time: Property,
    pub duration_minutes: Property,
    pub attendees: Property,
    pub description: Property,
    pub target: Property,
}

/// The fixed shape the model must reply with. Dates and times come
/// back as strings and are resolved locally against the reference
/// time.
#[derive(Deserialize)]
struct ScheduleEventArgs {
    operation: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    duration_minutes: Option<i64>,
    #[serde(default)]
    attendees: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

fn schedule_event_tool() -> Tool<ScheduleEventProps> {
    let function = Function {
        name: String::from(SCHEDULE_EVENT_FN),
        description: String::from(
            "Convert a natural language request into a structured calendar operation.",
        ),
        parameters: Parameters {
            r#type: String::from("object"),
            properties: ScheduleEventProps {
                operation: Property {
                    r#type: String::from("string"),
                    description: String::from("The kind of calendar operation requested."),
                    r#enum: Some(vec![
                        String::from("create"),
                        String::from("update"),
                        String::from("delete"),
                        String::from("query"),
                    ]),
                },
                title: Property {
                    r#type: String::from("string"),
                    description: String::from(
                        "The event title. For update, the new title if it is changing.",
                    ),
                    r#enum: None,
                },
                date: Property {
                    r#type: String::from("string"),
                    description: String::from(
                        "The event date, absolute (YYYY-MM-DD) or relative (tomorrow, friday, in 3 days).",
                    ),
                    r#enum: None,
                },
                time: Property {
                    r#type: String::from("string"),
                    description: String::from(
                        "The event start time, like 14:00 or 2pm.",
                    ),
                    r#enum: None,
                },
                duration_minutes: Property {
                    r#type: String::from("integer"),
                    description: String::from("The event duration in minutes."),
                    r#enum: None,
                },
                attendees: Property {
                    r#type: String::from("string"),
                    description: String::from(
                        "Comma-separated names of people attending the event.",
                    ),
                    r#enum: None,
                },
                description: Property {
                    r#type: String::from("string"),
                    description: String::from("A longer description of the event."),
                    r#enum: None,
                },
                target: Property {
                    r#type: String::from("string"),
                    description: String::from(
                        "For update and delete: keywords identifying the existing event.",
                    ),
                    r#enum: None,
                },
            },
            required: vec![String::from("operation")],
            additional_properties: false,
        },
        strict: true,
    };

    Tool {
        r#type: ToolType::Function,
        function,
    }
}

/// Extract a scheduling intent from free text. Relative dates resolve
/// against the supplied reference time, never the wall clock. Fails
/// with a parse error when the model's reply cannot be mapped to an
/// actionable intent; nothing is retried.
pub async fn extract_intent(
    text: &str,
    now: DateTime<Tz>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<SchedulingIntent, Error> {
    if text.trim().is_empty() {
        return Err(Error::Parse("empty request".to_string()));
    }

    let system_prompt = prompt::render_schedule_prompt(&now);
    let messages = vec![
        Message::new(Role::System, &system_prompt),
        Message::new(Role::User, text),
    ];
    let tools = vec![schedule_event_tool()];

    let response = completion(
        &messages,
        &tools,
        Some(SCHEDULE_EVENT_FN),
        api_hostname,
        api_key,
        model,
    )
    .await
    .map_err(|e| Error::Parse(e.to_string()))?;

    let arguments = tool_call_arguments(&response).map_err(|e| Error::Parse(e.to_string()))?;
    tracing::debug!("Extracted tool call arguments: {}", arguments);

    let args: ScheduleEventArgs = serde_json::from_str(&arguments)
        .map_err(|e| Error::Parse(format!("malformed tool call arguments: {}", e)))?;

    let operation = match args.operation.as_str() {
        "create" => Operation::Create,
        "update" => Operation::Update,
        "delete" => Operation::Delete,
        "query" => Operation::Query,
        other => {
            return Err(Error::Parse(format!("unknown operation \"{}\"", other)));
        }
    };

    let resolved = resolve::resolve_start(args.date.as_deref(), args.time.as_deref(), now)?;

    // Union the model's attendee list with names mentioned in the
    // raw text
    let mut attendees = attendees::extract_attendees(text);
    if let Some(list) = &args.attendees {
        for name in list.split(',') {
            let name = name.trim();
            if !name.is_empty() {
                attendees.insert(name.to_string());
            }
        }
    }

    let intent = SchedulingIntent {
        operation,
        title: args.title.unwrap_or_default().trim().to_string(),
        start: resolved.map(|r| r.start),
        date_only: resolved.map(|r| r.date_only).unwrap_or(false),
        duration_minutes: args.duration_minutes,
        attendees,
        description: args.description.filter(|d| !d.trim().is_empty()),
        target: args.target.filter(|t| !t.trim().is_empty()),
    };
    intent.validate()?;

    Ok(intent)
}
