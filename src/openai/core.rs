use std::time::Duration;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct Property {
    pub r#type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct Parameters<Props: Serialize> {
    pub r#type: String,
    pub properties: Props,
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

#[derive(Serialize)]
pub struct Function<Props: Serialize> {
    pub name: String,
    pub description: String,
    pub parameters: Parameters<Props>,
    pub strict: bool,
}

#[derive(Serialize)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

#[derive(Serialize)]
pub struct Tool<Props: Serialize> {
    pub r#type: ToolType,
    pub function: Function<Props>,
}

/// Request the next completion. When `tool_choice` names a function
/// the model is forced to reply with a call to it, so the response is
/// always a tool call with JSON arguments rather than free text.
pub async fn completion<Props: Serialize>(
    messages: &[Message],
    tools: &[Tool<Props>],
    tool_choice: Option<&str>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let mut payload = json!({
        "model": model,
        "messages": messages,
    });
    if !tools.is_empty() {
        payload["tools"] = json!(tools);
    }
    if let Some(name) = tool_choice {
        payload["tool_choice"] = json!({
            "type": "function",
            "function": {"name": name},
        });
    }
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .json(&payload)
        .send()
        .await?
        .json()
        .await?;

    Ok(response)
}

/// Pull the arguments of the first tool call out of a completion
/// response. Fails when the model replied with anything else.
pub fn tool_call_arguments(response: &Value) -> Result<String, Error> {
    let tool_calls = response["choices"][0]["message"]["tool_calls"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("No tool calls in response: {}", response))?;
    let arguments = tool_calls
        .first()
        .and_then(|call| call["function"]["arguments"].as_str())
        .ok_or_else(|| anyhow::anyhow!("Tool call missing arguments: {}", response))?;
    Ok(arguments.to_string())
}
