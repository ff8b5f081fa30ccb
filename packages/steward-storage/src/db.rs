use sqlx::{Connection, PgConnection};

use crate::{Result, models::Note};

/// Postgres code for "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

/// The fixed note-taking schema. Created lazily by `create_note` only; every
/// other operation treats a missing table as "no matching rows".
const NOTES_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS notes (
	id SERIAL PRIMARY KEY,
	title VARCHAR(200) UNIQUE NOT NULL,
	text TEXT NOT NULL,
	created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
	updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

/// Holds only the DSN; each statement runs on its own fresh connection.
#[derive(Clone, Debug)]
pub struct Db {
	dsn: String,
}
impl Db {
	pub fn new(cfg: &steward_config::Postgres) -> Self {
		Self { dsn: cfg.dsn.clone() }
	}

	async fn connect(&self) -> Result<PgConnection> {
		Ok(PgConnection::connect(&self.dsn).await?)
	}

	/// Runs user-reviewed DDL verbatim.
	pub async fn execute_ddl(&self, sql: &str) -> Result<()> {
		let mut conn = self.connect().await?;

		tracing::debug!(%sql, "Executing DDL.");
		sqlx::query(sql).execute(&mut conn).await?;

		Ok(())
	}

	/// Reports whether a row was inserted; a duplicate title inserts nothing.
	pub async fn create_note(&self, title: &str, text: &str) -> Result<bool> {
		self.execute_ddl(NOTES_SCHEMA).await?;

		let mut conn = self.connect().await?;
		let result = sqlx::query(
			"INSERT INTO notes (title, text) VALUES ($1, $2) ON CONFLICT (title) DO NOTHING",
		)
		.bind(title)
		.bind(text)
		.execute(&mut conn)
		.await?;

		Ok(result.rows_affected() == 1)
	}

	pub async fn note_by_title(&self, title: &str) -> Result<Option<Note>> {
		let mut conn = self.connect().await?;
		let row = sqlx::query_as::<_, Note>(
			"SELECT title, text, created_at, updated_at FROM notes WHERE title = $1",
		)
		.bind(title)
		.fetch_optional(&mut conn)
		.await;

		match row {
			Ok(note) => Ok(note),
			Err(err) if undefined_table(&err) => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	pub async fn list_titles(&self) -> Result<Vec<String>> {
		let mut conn = self.connect().await?;
		let titles = sqlx::query_scalar::<_, String>("SELECT title FROM notes ORDER BY title")
			.fetch_all(&mut conn)
			.await;

		match titles {
			Ok(titles) => Ok(titles),
			Err(err) if undefined_table(&err) => Ok(Vec::new()),
			Err(err) => Err(err.into()),
		}
	}

	pub async fn update_note(&self, title: &str, new_text: &str) -> Result<bool> {
		let mut conn = self.connect().await?;
		let result =
			sqlx::query("UPDATE notes SET text = $1, updated_at = NOW() WHERE title = $2")
				.bind(new_text)
				.bind(title)
				.execute(&mut conn)
				.await;

		match result {
			Ok(result) => Ok(result.rows_affected() == 1),
			Err(err) if undefined_table(&err) => Ok(false),
			Err(err) => Err(err.into()),
		}
	}

	pub async fn delete_note(&self, title: &str) -> Result<bool> {
		let mut conn = self.connect().await?;
		let result = sqlx::query("DELETE FROM notes WHERE title = $1")
			.bind(title)
			.execute(&mut conn)
			.await;

		match result {
			Ok(result) => Ok(result.rows_affected() == 1),
			Err(err) if undefined_table(&err) => Ok(false),
			Err(err) => Err(err.into()),
		}
	}

	/// Case-insensitive substring match over note text, ordered by title.
	pub async fn search_notes(&self, term: &str) -> Result<Vec<String>> {
		let mut conn = self.connect().await?;
		let titles = sqlx::query_scalar::<_, String>(
			"SELECT title FROM notes WHERE text ILIKE $1 ORDER BY title",
		)
		.bind(format!("%{term}%"))
		.fetch_all(&mut conn)
		.await;

		match titles {
			Ok(titles) => Ok(titles),
			Err(err) if undefined_table(&err) => Ok(Vec::new()),
			Err(err) => Err(err.into()),
		}
	}
}

fn undefined_table(err: &sqlx::Error) -> bool {
	matches!(
		err,
		sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNDEFINED_TABLE)
	)
}
