use crate::{
	Error, Result,
	decision::{Column, DdlAction, DdlIntent},
};

/// Renders a reviewed-before-execution DDL statement. Identifiers are
/// double-quoted verbatim; column types pass through unvalidated, so the
/// rendered text is only as trustworthy as the reviewer.
pub fn render_ddl(intent: &DdlIntent) -> Result<String> {
	match intent.action {
		DdlAction::CreateTable => {
			let columns = intent
				.columns
				.as_deref()
				.filter(|columns| !columns.is_empty())
				.ok_or_else(|| Error::InvalidDdl {
					message: "Columns are required to create a table.".to_string(),
				})?;
			let rendered =
				columns.iter().map(render_column).collect::<Vec<_>>().join(", ");

			Ok(format!("CREATE TABLE \"{}\" ({});", intent.table_name, rendered))
		},
		DdlAction::AddColumn => {
			let column = intent.target_column.as_ref().ok_or_else(|| Error::InvalidDdl {
				message: "A target column is required to add a column.".to_string(),
			})?;

			Ok(format!(
				"ALTER TABLE \"{}\" ADD COLUMN {};",
				intent.table_name,
				render_column(column)
			))
		},
	}
}

fn render_column(column: &Column) -> String {
	format!("\"{}\" {}", column.name, column.r#type)
}
