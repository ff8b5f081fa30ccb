use reqwest::Client;
use serde_json::Value;

use steward_domain::{ToolCall, ToolSpec};

use crate::{Error, Result};

/// One decision call: the model must pick a tool from the closed set. A single
/// attempt, riding the client's default timeout; a malformed response is
/// reported, never retried.
pub async fn decide(
	cfg: &steward_config::LlmProviderConfig,
	messages: &[Value],
	tools: &[ToolSpec],
) -> Result<ToolCall> {
	let client = Client::builder().build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
		"tools": tools.iter().map(ToolSpec::to_wire).collect::<Vec<_>>(),
		"tool_choice": "required",
	});

	tracing::debug!(model = %cfg.model, tool_count = tools.len(), "Requesting a decision.");

	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_tool_call(json)
}

fn parse_tool_call(json: Value) -> Result<ToolCall> {
	let function = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("tool_calls"))
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|call| call.get("function"))
		.ok_or_else(|| Error::InvalidResponse {
			message: "Decision response carries no tool call.".to_string(),
		})?;
	let name = function
		.get("name")
		.and_then(|v| v.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Decision tool call is missing its name.".to_string(),
		})?
		.to_string();
	let arguments = function.get("arguments").cloned().unwrap_or(Value::Null);

	Ok(ToolCall { name, arguments })
}
