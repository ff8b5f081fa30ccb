pub mod conversation;
pub mod ddl;
pub mod decision;
pub mod gate;
pub mod outcome;
pub mod toolset;

mod error;

pub use error::{Error, Result};

pub use conversation::{ConversationEntry, HISTORY_WINDOW, Role, window};
pub use ddl::render_ddl;
pub use decision::{
	ApiCall, ApiDecision, Column, DbDecision, DdlAction, DdlIntent, Method, NoteCommand, Question,
	ToolCall, parse_api_decision, parse_db_decision,
};
pub use gate::{ApiRoute, DbRoute, StagedDdl, route_api, route_db};
pub use outcome::{Outcome, OutcomeStatus};
pub use toolset::{ToolSpec, api_toolset, db_toolset};
