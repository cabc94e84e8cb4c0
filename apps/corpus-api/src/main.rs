use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = corpus_api::Args::parse();

	corpus_api::run(args).await
}
