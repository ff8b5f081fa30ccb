use crate::{
	Result, ddl,
	decision::{ApiCall, ApiDecision, DbDecision, DdlIntent, NoteCommand},
};

/// A DDL intent held for review together with the SQL it rendered to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedDdl {
	pub intent: DdlIntent,
	pub sql: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ApiRoute {
	/// Clarifying question; nothing executes.
	Reply(String),
	/// Read or delete class call, runs immediately.
	Execute(ApiCall),
	/// Write class call, held until the user confirms.
	Stage(ApiCall),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DbRoute {
	/// DDL always goes through review.
	Stage(StagedDdl),
	/// Note commands run immediately, mutating or not.
	Execute(NoteCommand),
}

pub fn route_api(decision: ApiDecision) -> ApiRoute {
	match decision {
		ApiDecision::Question(question) => ApiRoute::Reply(question.question_to_user),
		ApiDecision::Call(call) if call.method.requires_confirmation() => ApiRoute::Stage(call),
		ApiDecision::Call(call) => ApiRoute::Execute(call),
	}
}

pub fn route_db(decision: DbDecision) -> Result<DbRoute> {
	match decision {
		DbDecision::Ddl(intent) => {
			let sql = ddl::render_ddl(&intent)?;

			Ok(DbRoute::Stage(StagedDdl { intent, sql }))
		},
		DbDecision::Note(command) => Ok(DbRoute::Execute(command)),
	}
}
