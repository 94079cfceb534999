pub mod browse;
pub mod dashboard;
pub mod entries;
pub mod insights;
pub mod memory;
pub mod search;
pub mod store;
pub mod tags;
pub mod time_serde;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

pub use dashboard::Dashboard;
pub use entries::{CreateEntryRequest, Entry, EntryPage, UpdateEntryRequest};
pub use error::{Error, Result};
pub use insights::Insight;
pub use memory::MemoryStore;
pub use search::{SearchRequest, SearchResponse};
pub use store::{EntryStore, PgStore};
pub use tags::{TagCatalogue, TagView};
use vault_config::Config;
use vault_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct VaultService {
	pub cfg: Config,
	pub store: Arc<dyn EntryStore>,
}
impl VaultService {
	pub fn new(cfg: Config, store: Arc<dyn EntryStore>) -> Self {
		Self { cfg, store }
	}

	pub fn with_postgres(cfg: Config, db: Db) -> Self {
		Self::new(cfg, Arc::new(PgStore::new(db)))
	}

	pub fn page_size(&self) -> u32 {
		self.cfg.vault.page_size
	}
}

pub fn require_user(user: Option<Uuid>) -> Result<Uuid> {
	user.ok_or(Error::AuthRequired)
}
