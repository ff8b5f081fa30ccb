use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decision::{
	TOOL_ASK_QUESTION, TOOL_CREATE_NOTE, TOOL_DELETE_NOTE, TOOL_GENERATE_DDL_SQL, TOOL_LIST_NOTES,
	TOOL_REQUEST_API_CALL, TOOL_RETRIEVE_NOTE, TOOL_SEARCH_NOTES, TOOL_UPDATE_NOTE,
};

/// One entry of a closed toolset offered to the model.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ToolSpec {
	pub name: String,
	pub description: String,
	pub parameters: Value,
}
impl ToolSpec {
	fn new(name: &str, description: &str, parameters: Value) -> Self {
		Self { name: name.to_string(), description: description.to_string(), parameters }
	}

	/// The chat-completions `tools` array entry for this spec.
	pub fn to_wire(&self) -> Value {
		serde_json::json!({
			"type": "function",
			"function": {
				"name": self.name,
				"description": self.description,
				"parameters": self.parameters,
			},
		})
	}
}

pub fn api_toolset() -> Vec<ToolSpec> {
	vec![
		ToolSpec::new(
			TOOL_ASK_QUESTION,
			"Ask the user a clarifying question when the request is missing information \
			 needed for a valid API call.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"question_to_user": {
						"type": "string",
						"description": "A clear, specific question asking for the missing fields."
					}
				},
				"required": ["question_to_user"]
			}),
		),
		ToolSpec::new(
			TOOL_REQUEST_API_CALL,
			"Formulate a complete API call once every required field is known.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"endpoint": {
						"type": "string",
						"description": "The endpoint path to call, e.g. '/register/customer'."
					},
					"method": {
						"type": "string",
						"enum": ["GET", "POST", "PUT", "DELETE"],
						"description": "The HTTP method to use."
					},
					"json_payload": {
						"type": "object",
						"description": "The JSON body for POST or PUT requests."
					},
					"params": {
						"type": "object",
						"description": "URL query parameters for GET requests."
					}
				},
				"required": ["endpoint", "method"]
			}),
		),
	]
}

pub fn db_toolset() -> Vec<ToolSpec> {
	let column = serde_json::json!({
		"type": "object",
		"properties": {
			"name": { "type": "string", "description": "The name of the column." },
			"type": { "type": "string", "description": "The SQL data type of the column." }
		},
		"required": ["name", "type"]
	});

	vec![
		ToolSpec::new(
			TOOL_GENERATE_DDL_SQL,
			"Generate a DDL SQL statement for creating a table or adding a column.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"action": { "type": "string", "enum": ["create_table", "add_column"] },
					"table_name": { "type": "string" },
					"columns": {
						"type": "array",
						"items": column,
						"description": "All columns of the new table, for create_table."
					},
					"target_column": column,
				},
				"required": ["action", "table_name"]
			}),
		),
		ToolSpec::new(
			TOOL_CREATE_NOTE,
			"Create a new note with a given title and text.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"title": { "type": "string" },
					"text": { "type": "string" }
				},
				"required": ["title", "text"]
			}),
		),
		ToolSpec::new(
			TOOL_RETRIEVE_NOTE,
			"Retrieve a single note by its title.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"title": { "type": "string" }
				},
				"required": ["title"]
			}),
		),
		ToolSpec::new(
			TOOL_LIST_NOTES,
			"List the titles of all available notes.",
			serde_json::json!({
				"type": "object",
				"properties": {}
			}),
		),
		ToolSpec::new(
			TOOL_UPDATE_NOTE,
			"Replace the text of an existing note.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"title": { "type": "string" },
					"new_text": { "type": "string" }
				},
				"required": ["title", "new_text"]
			}),
		),
		ToolSpec::new(
			TOOL_DELETE_NOTE,
			"Delete a note by its title.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"title": { "type": "string" }
				},
				"required": ["title"]
			}),
		),
		ToolSpec::new(
			TOOL_SEARCH_NOTES,
			"Search for notes whose text contains a specific term.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"search_term": { "type": "string" }
				},
				"required": ["search_term"]
			}),
		),
	]
}
