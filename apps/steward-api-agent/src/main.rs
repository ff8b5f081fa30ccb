use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = steward_api_agent::Args::parse();
	steward_api_agent::run(args).await
}
