use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use steward_cli::repl::{self, ReplCommand};
use steward_domain::{Role, StagedDdl};
use steward_service::DbSession;

#[derive(Debug, Parser)]
#[command(
	version = steward_cli::VERSION,
	rename_all = "kebab",
	styles = steward_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = steward_config::load(&args.config)?;

	init_tracing(&config)?;
	print_hints();

	let mut session = DbSession::new(config);
	let mut printed = 0;

	loop {
		if let Some(staged) = session.staged() {
			render_staged(staged);
		}

		let Some(line) = repl::read_line("> ")? else { break };

		if line.is_empty() {
			continue;
		}

		match repl::classify(&line, session.staged().is_some()) {
			ReplCommand::Execute => session.execute_staged().await,
			ReplCommand::Cancel => session.cancel_staged(),
			ReplCommand::Utterance(text) => session.turn(&text).await,
		}

		printed = render_new_entries(&session, printed)?;
	}

	Ok(())
}

fn print_hints() {
	println!("Try commands like:");
	println!("- Create a table named products with an id, a name as text, and a price as numeric.");
	println!("- Update my shopping list to include milk and eggs.");
	println!("- Search for notes about meetings.");
}

fn render_new_entries(session: &DbSession, printed: usize) -> color_eyre::Result<usize> {
	let entries = session.conversation();

	for entry in &entries[printed..] {
		if entry.role != Role::Assistant {
			continue;
		}

		println!("agent> {}", entry.content);

		if let Some(data) = &entry.data {
			println!("{}", serde_json::to_string_pretty(data)?);
		}
	}

	Ok(entries.len())
}

fn render_staged(staged: &StagedDdl) {
	println!("agent> This SQL is staged:");
	println!("{}", staged.sql);
	println!("Type `execute` to run it or `cancel` to discard it.");
}

fn init_tracing(config: &steward_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	// Chat output owns stdout; diagnostics go to stderr.
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
