use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
	Success,
	Failed,
}

/// The single shape every executor path converges to before display.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Outcome {
	pub status: OutcomeStatus,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<Value>,
}
impl Outcome {
	pub fn success(message: impl Into<String>) -> Self {
		Self { status: OutcomeStatus::Success, message: message.into(), payload: None }
	}

	pub fn success_with(message: impl Into<String>, payload: Value) -> Self {
		Self { status: OutcomeStatus::Success, message: message.into(), payload: Some(payload) }
	}

	pub fn failed(message: impl Into<String>) -> Self {
		Self { status: OutcomeStatus::Failed, message: message.into(), payload: None }
	}

	pub fn is_success(&self) -> bool {
		self.status == OutcomeStatus::Success
	}
}
