pub mod request;
pub mod spec;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

/// Client for one target API. Sessions rebuild it whenever the user supplies a
/// new base URL; each call builds its own connection.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
	probe_timeout: Duration,
	request_timeout: Duration,
}
impl ApiClient {
	pub fn new(base_url: &str, cfg: &steward_config::Api) -> Result<Self> {
		if !base_url.starts_with("http") {
			return Err(Error::InvalidBaseUrl);
		}

		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			probe_timeout: Duration::from_millis(cfg.spec_probe_timeout_ms),
			request_timeout: Duration::from_millis(cfg.request_timeout_ms),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}
