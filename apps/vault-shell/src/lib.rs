pub mod command;
pub mod render;
pub mod shell;

use std::{
	io::{self, IsTerminal},
	path::PathBuf,
	sync::Arc,
};

use clap::Parser;
use tokio::io::BufReader;
use uuid::Uuid;

use vault_service::VaultService;
use vault_storage::db::Db;

use crate::shell::Shell;

#[derive(Debug, Parser)]
#[command(
	version = vault_cli::VERSION,
	rename_all = "kebab",
	styles = vault_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Act as this user instead of `session.user_id`.
	#[arg(long, value_name = "UUID")]
	pub user: Option<Uuid>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = vault_config::load(&args.config)?;

	vault_cli::init_tracing_stderr(&config.service.log_level);

	let user = args.user.or_else(|| config.session.as_ref().map(|session| session.user_id));

	if user.is_none() {
		tracing::warn!("No session user configured. Data commands will ask you to sign in.");
	}

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let service = Arc::new(VaultService::with_postgres(config, db));
	let interactive = io::stdin().is_terminal();
	let mut shell = Shell::new(service, user, io::stdout());

	shell.run(BufReader::new(tokio::io::stdin()), interactive).await?;

	Ok(())
}
