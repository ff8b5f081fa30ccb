use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub llm: LlmProviderConfig,
	#[serde(default)]
	pub api: Api,
	pub storage: Storage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Chat-completions endpoint used for decision calls. The call itself rides the
/// client's default timeout, so no timeout field lives here.
#[derive(Clone, Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub api_base: String,
	pub api_key: String,
	#[serde(default = "default_llm_path")]
	pub path: String,
	pub model: String,
	#[serde(default)]
	pub temperature: f32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Api {
	pub spec_probe_timeout_ms: u64,
	pub request_timeout_ms: u64,
}
impl Default for Api {
	fn default() -> Self {
		Self { spec_probe_timeout_ms: 10_000, request_timeout_ms: 30_000 }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
}

fn default_llm_path() -> String {
	"/chat/completions".to_string()
}
