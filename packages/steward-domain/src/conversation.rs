use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How many trailing entries a decision call sees.
pub const HISTORY_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

/// One chat line. Entries are append-only; `data` carries structured results
/// (API payloads, notes, title lists) alongside the rendered text.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ConversationEntry {
	pub role: Role,
	pub content: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}
impl ConversationEntry {
	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into(), data: None }
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self { role: Role::Assistant, content: content.into(), data: None }
	}

	pub fn assistant_with(content: impl Into<String>, data: Value) -> Self {
		Self { role: Role::Assistant, content: content.into(), data: Some(data) }
	}
}

pub fn window(entries: &[ConversationEntry]) -> &[ConversationEntry] {
	let start = entries.len().saturating_sub(HISTORY_WINDOW);

	&entries[start..]
}
