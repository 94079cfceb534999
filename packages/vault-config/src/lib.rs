mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Postgres, Security, Service, Session, Storage, Vault,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.vault.page_size == 0 {
		return Err(Error::Validation {
			message: "vault.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.vault.page_size > MAX_PAGE_SIZE {
		return Err(Error::Validation {
			message: format!("vault.page_size must be {MAX_PAGE_SIZE} or less."),
		});
	}

	for (label, value) in [
		("vault.max_title_chars", cfg.vault.max_title_chars),
		("vault.max_content_chars", cfg.vault.max_content_chars),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if let Some(session) = cfg.session.as_ref()
		&& session.user_id.is_nil()
	{
		return Err(Error::Validation {
			message: "session.user_id must not be the nil UUID.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}
	if let Some(token) = cfg.security.api_auth_token.as_mut() {
		*token = token.trim().to_string();
	}
}
