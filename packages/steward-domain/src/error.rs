pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown tool call {name:?}.")]
	UnknownTool { name: String },
	#[error("Arguments for tool {name:?} are malformed: {message}")]
	MalformedArguments { name: String, message: String },
	#[error("{message}")]
	InvalidDdl { message: String },
}
