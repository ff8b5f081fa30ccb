use steward_domain::{
	ConversationEntry, DbRoute, NoteCommand, Outcome, StagedDdl, db_toolset, parse_db_decision,
	route_db, window,
};
use steward_storage::db::Db;

use crate::{Error, Providers, Result, prompt};

const STAGE_NOTICE: &str = "SQL generated. Review it, then execute or cancel.";

/// One interactive database session: the append-only conversation and at most
/// one staged DDL statement. Note commands never stage; they run as soon as
/// they are decided.
pub struct DbSession {
	cfg: steward_config::Config,
	providers: Providers,
	db: Db,
	conversation: Vec<ConversationEntry>,
	staged: Option<StagedDdl>,
}
impl DbSession {
	pub fn new(cfg: steward_config::Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: steward_config::Config, providers: Providers) -> Self {
		let db = Db::new(&cfg.storage.postgres);

		Self { cfg, providers, db, conversation: Vec::new(), staged: None }
	}

	pub fn conversation(&self) -> &[ConversationEntry] {
		&self.conversation
	}

	pub fn staged(&self) -> Option<&StagedDdl> {
		self.staged.as_ref()
	}

	/// Runs one user turn. Every failure is folded into an assistant entry;
	/// the session itself survives any turn.
	pub async fn turn(&mut self, input: &str) {
		self.conversation.push(ConversationEntry::user(input));

		if let Err(err) = self.run_turn(input).await {
			self.push_assistant(format!("Sorry, an error occurred: {err}"));
		}
	}

	/// Runs the staged SQL verbatim and clears the stage.
	pub async fn execute_staged(&mut self) {
		let Some(staged) = self.staged.take() else { return };
		let outcome = match self.db.execute_ddl(&staged.sql).await {
			Ok(()) => Outcome::success("Command executed successfully."),
			Err(err) => Outcome::failed(format!("Database error: {err}")),
		};

		self.push_assistant(outcome.message);
	}

	/// Clears the stage without touching the database.
	pub fn cancel_staged(&mut self) {
		if self.staged.take().is_some() {
			self.push_assistant("Staged SQL discarded.");
		}
	}

	async fn run_turn(&mut self, input: &str) -> Result<()> {
		let messages = prompt::build_db_messages(window(&self.conversation), input)?;
		let call = self.providers.decision.decide(&self.cfg.llm, &messages, &db_toolset()).await?;
		let decision = parse_db_decision(&call)?;

		match route_db(decision) {
			Ok(DbRoute::Stage(staged)) => {
				tracing::info!(sql = %staged.sql, "Staged DDL for review.");

				self.conversation.push(ConversationEntry::assistant_with(
					STAGE_NOTICE,
					serde_json::json!({ "sql": staged.sql.clone() }),
				));
				// Replaces any previously staged statement; only one may be pending.
				self.staged = Some(staged);
			},
			Ok(DbRoute::Execute(command)) => self.run_note_command(command).await?,
			// Unrenderable DDL reads back as guidance, not as a turn failure.
			Err(err) => self.push_assistant(err.to_string()),
		}

		Ok(())
	}

	async fn run_note_command(&mut self, command: NoteCommand) -> Result<()> {
		let outcome = match command {
			NoteCommand::Create { title, text } => {
				let message = if self.db.create_note(&title, &text).await? {
					format!("Note '{title}' created successfully.")
				} else {
					format!("Failed: note '{title}' may already exist.")
				};

				Outcome::success(message)
			},
			NoteCommand::Retrieve { title } => match self.db.note_by_title(&title).await? {
				Some(note) => {
					let payload =
						serde_json::to_value(&note).map_err(|_| Error::InvalidRequest {
							message: "Failed to serialize the note.".to_string(),
						})?;

					Outcome::success_with(format!("Retrieved note '{title}'."), payload)
				},
				None => Outcome::success(format!("Note '{title}' not found.")),
			},
			NoteCommand::List => {
				let titles = self.db.list_titles().await?;

				Outcome::success_with("Retrieved all note titles.", serde_json::json!(titles))
			},
			NoteCommand::Update { title, new_text } => {
				let message = if self.db.update_note(&title, &new_text).await? {
					format!("Note '{title}' updated successfully.")
				} else {
					format!("Failed to update note '{title}' (not found?).")
				};

				Outcome::success(message)
			},
			NoteCommand::Delete { title } => {
				let message = if self.db.delete_note(&title).await? {
					format!("Note '{title}' deleted successfully.")
				} else {
					format!("Failed to delete note '{title}' (not found?).")
				};

				Outcome::success(message)
			},
			NoteCommand::Search { search_term } => {
				let titles = self.db.search_notes(&search_term).await?;

				Outcome::success_with(
					format!("Found {} notes containing '{search_term}'.", titles.len()),
					serde_json::json!(titles),
				)
			},
		};

		self.push_outcome(outcome);

		Ok(())
	}

	fn push_assistant(&mut self, content: impl Into<String>) {
		self.conversation.push(ConversationEntry::assistant(content));
	}

	fn push_outcome(&mut self, outcome: Outcome) {
		let entry = match outcome.payload {
			Some(data) => ConversationEntry::assistant_with(outcome.message, data),
			None => ConversationEntry::assistant(outcome.message),
		};

		self.conversation.push(entry);
	}
}
