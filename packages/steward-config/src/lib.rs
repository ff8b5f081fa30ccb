mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Api, Config, LlmProviderConfig, Postgres, Service, Storage};

use std::{env, fs, path::Path};

pub const ENV_LLM_API_KEY: &str = "STEWARD_LLM_API_KEY";
pub const ENV_PG_DSN: &str = "STEWARD_PG_DSN";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if !cfg.llm.api_base.starts_with("http") {
		return Err(Error::Validation {
			message: "llm.api_base must start with http.".to_string(),
		});
	}
	if cfg.llm.api_key.trim().is_empty() {
		return Err(Error::Validation { message: "llm.api_key must be non-empty.".to_string() });
	}
	if cfg.llm.model.trim().is_empty() {
		return Err(Error::Validation { message: "llm.model must be non-empty.".to_string() });
	}
	if !cfg.llm.temperature.is_finite() {
		return Err(Error::Validation {
			message: "llm.temperature must be a finite number.".to_string(),
		});
	}
	if cfg.api.spec_probe_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "api.spec_probe_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.api.request_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "api.request_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}

	Ok(())
}

/// Credentials may come from the environment instead of the config file; a set
/// environment variable wins over the file value.
fn normalize(cfg: &mut Config) {
	if let Ok(key) = env::var(ENV_LLM_API_KEY)
		&& !key.trim().is_empty()
	{
		cfg.llm.api_key = key;
	}
	if let Ok(dsn) = env::var(ENV_PG_DSN)
		&& !dsn.trim().is_empty()
	{
		cfg.storage.postgres.dsn = dsn;
	}

	cfg.llm.api_base = cfg.llm.api_base.trim_end_matches('/').to_string();
}
