use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use steward_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn set_str(root: &mut toml::Table, section: &str, key: &str, raw: &str) {
	let table = root
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{section}]."));

	table.insert(key.to_string(), Value::String(raw.to_string()));
}

fn set_int(root: &mut toml::Table, section: &str, key: &str, raw: i64) {
	let table = root
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{section}]."));

	table.insert(key.to_string(), Value::Integer(raw));
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("steward_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_and_remove(payload: String) -> steward_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = steward_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn assert_validation_error(payload: String, needle: &str) {
	let err = load_and_remove(payload).expect_err("Expected a validation error.");
	let message = err.to_string();

	assert!(message.contains(needle), "Unexpected error message: {message}");
}

#[test]
fn loads_template_config() {
	let cfg = load_and_remove(sample_toml_with(|_| {})).expect("Template config must load.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.llm.model, "gpt-4o-mini");
	assert_eq!(cfg.llm.path, "/chat/completions");
	assert_eq!(cfg.api.spec_probe_timeout_ms, 10_000);
	assert_eq!(cfg.api.request_timeout_ms, 30_000);
}

#[test]
fn api_section_defaults_when_omitted() {
	let payload = sample_toml_with(|root| {
		root.remove("api");
	});
	let cfg = load_and_remove(payload).expect("Config without [api] must load.");

	assert_eq!(cfg.api.spec_probe_timeout_ms, 10_000);
	assert_eq!(cfg.api.request_timeout_ms, 30_000);
}

#[test]
fn api_base_trailing_slash_is_trimmed() {
	let payload = sample_toml_with(|root| {
		set_str(root, "llm", "api_base", "https://api.openai.com/v1/");
	});
	let cfg = load_and_remove(payload).expect("Config must load.");

	assert_eq!(cfg.llm.api_base, "https://api.openai.com/v1");
}

#[test]
fn rejects_non_http_api_base() {
	let payload = sample_toml_with(|root| {
		set_str(root, "llm", "api_base", "ftp://api.openai.com/v1");
	});

	assert_validation_error(payload, "llm.api_base must start with http.");
}

#[test]
fn rejects_blank_model() {
	let payload = sample_toml_with(|root| {
		set_str(root, "llm", "model", "  ");
	});

	assert_validation_error(payload, "llm.model must be non-empty.");
}

#[test]
fn rejects_zero_probe_timeout() {
	let payload = sample_toml_with(|root| {
		set_int(root, "api", "spec_probe_timeout_ms", 0);
	});

	assert_validation_error(payload, "api.spec_probe_timeout_ms must be greater than zero.");
}

#[test]
fn rejects_zero_request_timeout() {
	let payload = sample_toml_with(|root| {
		set_int(root, "api", "request_timeout_ms", 0);
	});

	assert_validation_error(payload, "api.request_timeout_ms must be greater than zero.");
}

#[test]
fn rejects_blank_log_level() {
	let payload = sample_toml_with(|root| {
		set_str(root, "service", "log_level", "");
	});

	assert_validation_error(payload, "service.log_level must be non-empty.");
}

#[test]
fn validate_rejects_blank_api_key() {
	let payload = sample_toml_with(|root| {
		set_str(root, "llm", "api_key", " ");
	});
	// Checked through `validate` directly so a concurrently set STEWARD_LLM_API_KEY
	// cannot mask the blank file value.
	let cfg: Config = toml::from_str(&payload).expect("Config must parse.");
	let err = steward_config::validate(&cfg).expect_err("Expected a validation error.");

	assert!(err.to_string().contains("llm.api_key must be non-empty."));
}

#[test]
fn validate_rejects_blank_dsn() {
	let payload = sample_toml_with(|root| {
		let storage = root
			.get_mut("storage")
			.and_then(Value::as_table_mut)
			.expect("Template config must include [storage].");
		let postgres = storage
			.get_mut("postgres")
			.and_then(Value::as_table_mut)
			.expect("Template config must include [storage.postgres].");

		postgres.insert("dsn".to_string(), Value::String(String::new()));
	});
	let cfg: Config = toml::from_str(&payload).expect("Config must parse.");
	let err = steward_config::validate(&cfg).expect_err("Expected a validation error.");

	assert!(err.to_string().contains("storage.postgres.dsn must be non-empty."));
}

#[test]
fn missing_file_is_a_read_error() {
	let mut path = env::temp_dir();

	path.push("steward_config_test_missing.toml");

	let err = steward_config::load(&path).expect_err("Expected a read error.");

	assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn env_overrides_credentials() {
	// `set_var` is unsafe in edition 2024; this test owns both variables and
	// restores them before returning.
	unsafe {
		env::set_var(steward_config::ENV_LLM_API_KEY, "env-key");
		env::set_var(steward_config::ENV_PG_DSN, "postgres://env-host/steward");
	}

	let result = load_and_remove(sample_toml_with(|_| {}));

	unsafe {
		env::remove_var(steward_config::ENV_LLM_API_KEY);
		env::remove_var(steward_config::ENV_PG_DSN);
	}

	let cfg = result.expect("Config must load.");

	assert_eq!(cfg.llm.api_key, "env-key");
	assert_eq!(cfg.storage.postgres.dsn, "postgres://env-host/steward");
}
