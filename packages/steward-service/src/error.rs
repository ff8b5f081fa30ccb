pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	Decision { message: String },
	#[error("{message}")]
	Http { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<steward_domain::Error> for Error {
	fn from(err: steward_domain::Error) -> Self {
		Self::Decision { message: err.to_string() }
	}
}

impl From<steward_http::Error> for Error {
	fn from(err: steward_http::Error) -> Self {
		Self::Http { message: err.to_string() }
	}
}

impl From<steward_providers::Error> for Error {
	fn from(err: steward_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<steward_storage::Error> for Error {
	fn from(err: steward_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
