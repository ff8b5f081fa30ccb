pub mod api;
pub mod db;

mod error;
mod prompt;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use steward_config::LlmProviderConfig;
use steward_domain::{ToolCall, ToolSpec};

pub use api::ApiSession;
pub use db::DbSession;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The one non-deterministic seam in the pipeline. Everything downstream of a
/// returned `ToolCall` (validation, gating, execution, staging) is
/// deterministic and testable with a scripted implementation.
pub trait DecisionProvider
where
	Self: Send + Sync,
{
	fn decide<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
		tools: &'a [ToolSpec],
	) -> BoxFuture<'a, Result<ToolCall>>;
}

#[derive(Clone)]
pub struct Providers {
	pub decision: Arc<dyn DecisionProvider>,
}

struct DefaultProviders;

impl Providers {
	pub fn new(decision: Arc<dyn DecisionProvider>) -> Self {
		Self { decision }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { decision: Arc::new(DefaultProviders) }
	}
}

impl DecisionProvider for DefaultProviders {
	fn decide<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
		tools: &'a [ToolSpec],
	) -> BoxFuture<'a, Result<ToolCall>> {
		Box::pin(async move { Ok(steward_providers::decision::decide(cfg, messages, tools).await?) })
	}
}
