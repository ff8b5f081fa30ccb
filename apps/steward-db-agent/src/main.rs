use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = steward_db_agent::Args::parse();
	steward_db_agent::run(args).await
}
