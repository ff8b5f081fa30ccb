use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use steward_cli::repl::{self, ReplCommand};
use steward_domain::{ApiCall, Role};
use steward_service::ApiSession;

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

	let mut session = ApiSession::new(config);
	let mut printed = render_new_entries(&session, 0)?;

	loop {
		if let Some(call) = session.staged() {
			render_staged(call)?;
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

fn render_new_entries(session: &ApiSession, printed: usize) -> color_eyre::Result<usize> {
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

fn render_staged(call: &ApiCall) -> color_eyre::Result<()> {
	println!("agent> A {} call to `{}` is staged:", call.method, call.endpoint);
	println!("{}", serde_json::to_string_pretty(call)?);
	println!("Type `execute` to run it or `cancel` to discard it.");

	Ok(())
}

fn init_tracing(config: &steward_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	// Chat output owns stdout; diagnostics go to stderr.
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
