use regex::Regex;

use steward_domain::{
	ApiCall, ApiRoute, ConversationEntry, Outcome, api_toolset, parse_api_decision, route_api,
	window,
};
use steward_http::ApiClient;

use crate::{Error, Providers, Result, prompt};

const GREETING: &str = "Hello! Please provide an API base URL to begin.";
const NO_TARGET_PROMPT: &str = "Please provide an API base URL first.";
const URL_PATTERN: &str = r"https?://[^\s/]+(?::\d+)?";

/// One interactive API session: the append-only conversation, the configured
/// target with its cached specification, and at most one staged call.
pub struct ApiSession {
	cfg: steward_config::Config,
	providers: Providers,
	conversation: Vec<ConversationEntry>,
	client: Option<ApiClient>,
	spec_text: Option<String>,
	staged: Option<ApiCall>,
}
impl ApiSession {
	pub fn new(cfg: steward_config::Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: steward_config::Config, providers: Providers) -> Self {
		Self {
			cfg,
			providers,
			conversation: vec![ConversationEntry::assistant(GREETING)],
			client: None,
			spec_text: None,
			staged: None,
		}
	}

	pub fn conversation(&self) -> &[ConversationEntry] {
		&self.conversation
	}

	pub fn staged(&self) -> Option<&ApiCall> {
		self.staged.as_ref()
	}

	/// Runs one user turn. Every failure is folded into an assistant entry;
	/// the session itself survives any turn.
	pub async fn turn(&mut self, input: &str) {
		self.conversation.push(ConversationEntry::user(input));

		if let Err(err) = self.run_turn(input).await {
			self.push_assistant(format!("An error occurred: {err}"));
		}
	}

	/// Runs the staged call and clears the stage.
	pub async fn execute_staged(&mut self) {
		let Some(call) = self.staged.take() else { return };

		if let Some(client) = self.client.clone() {
			let outcome = client.execute(&call).await;

			self.push_outcome(outcome);
		}
	}

	/// Clears the stage without contacting the backend.
	pub fn cancel_staged(&mut self) {
		if self.staged.take().is_some() {
			self.push_assistant("API call cancelled.");
		}
	}

	async fn run_turn(&mut self, input: &str) -> Result<()> {
		if let Some(url) = detect_url(input) {
			return self.set_target(&url).await;
		}

		let Some(client) = self.client.clone() else {
			self.push_assistant(NO_TARGET_PROMPT);

			return Ok(());
		};
		let messages =
			prompt::build_api_messages(self.spec_text.as_deref(), window(&self.conversation), input)?;
		let call =
			self.providers.decision.decide(&self.cfg.llm, &messages, &api_toolset()).await?;
		let decision = parse_api_decision(&call)?;

		match route_api(decision) {
			ApiRoute::Reply(question) => self.push_assistant(question),
			ApiRoute::Stage(call) => {
				tracing::info!(
					method = %call.method,
					endpoint = %call.endpoint,
					"Staged an API call for review."
				);

				// Replaces any previously staged call; only one may be pending.
				self.staged = Some(call);
			},
			ApiRoute::Execute(call) => {
				let outcome = client.execute(&call).await;

				self.push_outcome(outcome);
			},
		}

		Ok(())
	}

	/// Replaces the target wholesale: a new client and specification together,
	/// with the stage cleared. Conversation history is kept.
	async fn set_target(&mut self, url: &str) -> Result<()> {
		let client = ApiClient::new(url, &self.cfg.api)?;
		let spec_text = match client.fetch_spec().await {
			Some(spec) => Some(serde_json::to_string_pretty(&spec).map_err(|_| {
				Error::InvalidRequest {
					message: "Failed to render the fetched specification.".to_string(),
				}
			})?),
			None => None,
		};
		let message = if spec_text.is_some() {
			format!(
				"API base URL set to `{}` and specification loaded. How can I help?",
				client.base_url()
			)
		} else {
			format!("API base URL set to `{}`, but no specification was found.", client.base_url())
		};

		self.client = Some(client);
		self.spec_text = spec_text;
		self.staged = None;
		self.push_assistant(message);

		Ok(())
	}

	fn push_assistant(&mut self, content: impl Into<String>) {
		self.conversation.push(ConversationEntry::assistant(content));
	}

	fn push_outcome(&mut self, outcome: Outcome) {
		let data = outcome.payload.clone().unwrap_or_else(|| {
			serde_json::json!({ "status": outcome.status, "message": outcome.message })
		});

		self.conversation.push(ConversationEntry::assistant_with("API call completed.", data));
	}
}

fn detect_url(input: &str) -> Option<String> {
	Regex::new(URL_PATTERN).ok().and_then(|re| re.find(input)).map(|m| m.as_str().to_string())
}
