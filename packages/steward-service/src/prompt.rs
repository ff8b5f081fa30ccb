use serde_json::Value;

use steward_domain::ConversationEntry;

use crate::{Error, Result};

const NO_SPEC_PLACEHOLDER: &str = "(no specification loaded)";

/// Builds the decision context for the API pipeline. The windowed history and
/// the specification text are embedded between labeled markers so the model can
/// check the request for completeness instead of inventing field values.
pub(crate) fn build_api_messages(
	spec_text: Option<&str>,
	history: &[ConversationEntry],
	utterance: &str,
) -> Result<Vec<Value>> {
	let history_json = serialize_history(history)?;
	let system_prompt = format!(
		"You are an expert assistant that translates user requests into structured actions. \
You have two possible actions: ask a clarifying question, or formulate an API call.\n\
1. Analyze the conversation: review the user's latest request against the recent chat \
history and the API specification provided below.\n\
2. Check for completeness: does the request contain ALL the information needed to make \
a valid API call according to the specification?\n\
3. Decide your action: if the request is incomplete, you MUST call `ask_question` and \
ask for the specific missing fields. If the request is complete, you MUST call \
`request_api_call`.\n\
Never make up data for fields. Always ask if information is missing.\n\n\
--- RECENT CHAT HISTORY ---\n{history_json}\n\n\
--- API SPECIFICATION ---\n{spec}\n\
--- END OF CONTEXT ---",
		spec = spec_text.unwrap_or(NO_SPEC_PLACEHOLDER),
	);

	Ok(vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": utterance }),
	])
}

/// Builds the decision context for the database pipeline. This toolset has no
/// question tool; the model is told to always answer with a tool call.
pub(crate) fn build_db_messages(
	history: &[ConversationEntry],
	utterance: &str,
) -> Result<Vec<Value>> {
	let history_json = serialize_history(history)?;
	let system_prompt = format!(
		"You are a tool-calling engine. Based on the user's input, you MUST call one of \
the available tools. Do not respond with conversational text; your sole purpose is to \
translate user requests into tool calls. For table creation or modification, use \
`generate_ddl_sql`. For note management, use the appropriate note tool.\n\n\
--- RECENT CHAT HISTORY ---\n{history_json}\n\
--- END OF CONTEXT ---"
	);

	Ok(vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": utterance }),
	])
}

fn serialize_history(history: &[ConversationEntry]) -> Result<String> {
	serde_json::to_string(history).map_err(|_| Error::InvalidRequest {
		message: "Failed to serialize chat history.".to_string(),
	})
}
