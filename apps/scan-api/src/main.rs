use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = scan_api::Args::parse();

	scan_api::run(args).await
}
