use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vault_shell::Args::parse();

	vault_shell::run(args).await
}
