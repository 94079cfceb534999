use vault_domain::entry::RejectCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Authentication required.")]
	AuthRequired,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String, field: Option<String> },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Configuration error: {message}")]
	Configuration { message: String },
}
impl Error {
	pub fn invalid(message: impl Into<String>, field: &str) -> Self {
		Self::InvalidRequest { message: message.into(), field: Some(field.to_string()) }
	}
}
impl From<RejectCode> for Error {
	fn from(code: RejectCode) -> Self {
		Self::invalid(code.message(), code.field())
	}
}
impl From<vault_storage::Error> for Error {
	fn from(err: vault_storage::Error) -> Self {
		match err {
			vault_storage::Error::Sqlx(inner) if store_unavailable(&inner) =>
				Self::Configuration { message: inner.to_string() },
			vault_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			vault_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { message, field: None },
			vault_storage::Error::NotFound(message) => Self::NotFound { message },
			vault_storage::Error::Conflict(message) => Self::Storage { message },
		}
	}
}

fn store_unavailable(err: &sqlx::Error) -> bool {
	matches!(
		err,
		sqlx::Error::Configuration(_)
			| sqlx::Error::Io(_)
			| sqlx::Error::Tls(_)
			| sqlx::Error::PoolTimedOut
			| sqlx::Error::PoolClosed
	)
}
