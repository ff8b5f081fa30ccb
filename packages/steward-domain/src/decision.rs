use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

pub const TOOL_ASK_QUESTION: &str = "ask_question";
pub const TOOL_REQUEST_API_CALL: &str = "request_api_call";
pub const TOOL_GENERATE_DDL_SQL: &str = "generate_ddl_sql";
pub const TOOL_CREATE_NOTE: &str = "create_note";
pub const TOOL_RETRIEVE_NOTE: &str = "retrieve_note";
pub const TOOL_LIST_NOTES: &str = "list_notes";
pub const TOOL_UPDATE_NOTE: &str = "update_note";
pub const TOOL_DELETE_NOTE: &str = "delete_note";
pub const TOOL_SEARCH_NOTES: &str = "search_notes";

/// A raw tool call as the model returned it, before shape validation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ToolCall {
	pub name: String,
	pub arguments: Value,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}
impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}

	/// POST and PUT are held for review; GET and DELETE run immediately.
	pub fn requires_confirmation(&self) -> bool {
		matches!(self, Self::Post | Self::Put)
	}
}
impl std::fmt::Display for Method {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ApiCall {
	pub endpoint: String,
	pub method: Method,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub json_payload: Option<Map<String, Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub params: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Question {
	pub question_to_user: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ApiDecision {
	Question(Question),
	Call(ApiCall),
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DdlAction {
	CreateTable,
	AddColumn,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Column {
	pub name: String,
	pub r#type: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct DdlIntent {
	pub action: DdlAction,
	pub table_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub columns: Option<Vec<Column>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_column: Option<Column>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NoteCommand {
	Create { title: String, text: String },
	Retrieve { title: String },
	List,
	Update { title: String, new_text: String },
	Delete { title: String },
	Search { search_term: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DbDecision {
	Ddl(DdlIntent),
	Note(NoteCommand),
}

#[derive(Debug, Deserialize)]
struct TitleArgs {
	title: String,
}

#[derive(Debug, Deserialize)]
struct CreateNoteArgs {
	title: String,
	text: String,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteArgs {
	title: String,
	new_text: String,
}

#[derive(Debug, Deserialize)]
struct SearchNotesArgs {
	search_term: String,
}

pub fn parse_api_decision(call: &ToolCall) -> Result<ApiDecision> {
	let arguments = coerce_arguments(call)?;

	match call.name.as_str() {
		TOOL_ASK_QUESTION => Ok(ApiDecision::Question(parse_arguments(&call.name, arguments)?)),
		TOOL_REQUEST_API_CALL => Ok(ApiDecision::Call(parse_arguments(&call.name, arguments)?)),
		other => Err(Error::UnknownTool { name: other.to_string() }),
	}
}

pub fn parse_db_decision(call: &ToolCall) -> Result<DbDecision> {
	let arguments = coerce_arguments(call)?;

	match call.name.as_str() {
		TOOL_GENERATE_DDL_SQL => Ok(DbDecision::Ddl(parse_arguments(&call.name, arguments)?)),
		TOOL_CREATE_NOTE => {
			let CreateNoteArgs { title, text } = parse_arguments(&call.name, arguments)?;

			Ok(DbDecision::Note(NoteCommand::Create { title, text }))
		},
		TOOL_RETRIEVE_NOTE => {
			let TitleArgs { title } = parse_arguments(&call.name, arguments)?;

			Ok(DbDecision::Note(NoteCommand::Retrieve { title }))
		},
		TOOL_LIST_NOTES => Ok(DbDecision::Note(NoteCommand::List)),
		TOOL_UPDATE_NOTE => {
			let UpdateNoteArgs { title, new_text } = parse_arguments(&call.name, arguments)?;

			Ok(DbDecision::Note(NoteCommand::Update { title, new_text }))
		},
		TOOL_DELETE_NOTE => {
			let TitleArgs { title } = parse_arguments(&call.name, arguments)?;

			Ok(DbDecision::Note(NoteCommand::Delete { title }))
		},
		TOOL_SEARCH_NOTES => {
			let SearchNotesArgs { search_term } = parse_arguments(&call.name, arguments)?;

			Ok(DbDecision::Note(NoteCommand::Search { search_term }))
		},
		other => Err(Error::UnknownTool { name: other.to_string() }),
	}
}

/// Models sometimes deliver `arguments` as a JSON-encoded string instead of a
/// native object. A string gets exactly one parse pass; anything still not an
/// object is malformed.
fn coerce_arguments(call: &ToolCall) -> Result<Value> {
	let value = match &call.arguments {
		Value::String(raw) =>
			serde_json::from_str(raw).map_err(|err| Error::MalformedArguments {
				name: call.name.clone(),
				message: format!("not valid JSON text: {err}"),
			})?,
		other => other.clone(),
	};

	if !value.is_object() {
		return Err(Error::MalformedArguments {
			name: call.name.clone(),
			message: "expected a JSON object".to_string(),
		});
	}

	Ok(value)
}

fn parse_arguments<T>(name: &str, arguments: Value) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	serde_json::from_value(arguments).map_err(|err| Error::MalformedArguments {
		name: name.to_string(),
		message: err.to_string(),
	})
}
