use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub vault: Vault,
	pub security: Security,
	/// Optional. Identity used by the interactive shell; absent means signed out.
	pub session: Option<Session>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Vault {
	pub page_size: u32,
	pub max_title_chars: u32,
	pub max_content_chars: u32,
}
impl Default for Vault {
	fn default() -> Self {
		Self { page_size: DEFAULT_PAGE_SIZE, max_title_chars: 300, max_content_chars: 100_000 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	/// Optional. When set, HTTP callers must present it as a bearer token.
	pub api_auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Session {
	pub user_id: Uuid,
}
