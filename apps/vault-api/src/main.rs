use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vault_api::Args::parse();

	vault_api::run(args).await
}
