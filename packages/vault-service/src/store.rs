use uuid::Uuid;

use vault_storage::{
	Result as StorageResult,
	db::Db,
	models::{EntryRow, EntrySearch, InsightRow, TagColorRow, TagRow},
	queries,
};

use crate::BoxFuture;

pub trait EntryStore
where
	Self: Send + Sync,
{
	fn count_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<u64>>;

	fn list_entries_page(
		&self,
		user_id: Uuid,
		offset: u64,
		limit: u32,
	) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>>;

	fn list_all_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>>;

	fn search_entries<'a>(
		&'a self,
		user_id: Uuid,
		search: &'a EntrySearch,
	) -> BoxFuture<'a, StorageResult<Vec<EntryRow>>>;

	fn get_entry(
		&self,
		user_id: Uuid,
		entry_id: Uuid,
	) -> BoxFuture<'_, StorageResult<Option<EntryRow>>>;

	fn insert_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>>;

	fn update_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>>;

	fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> BoxFuture<'_, StorageResult<()>>;

	fn list_tags(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagRow>>>;

	fn list_tag_colors(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagColorRow>>>;

	fn upsert_tag_color<'a>(&'a self, color: &'a TagColorRow) -> BoxFuture<'a, StorageResult<()>>;

	fn latest_insight(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Option<InsightRow>>>;

	fn insert_insight<'a>(&'a self, insight: &'a InsightRow) -> BoxFuture<'a, StorageResult<()>>;
}

pub struct PgStore {
	db: Db,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl EntryStore for PgStore {
	fn count_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<u64>> {
		Box::pin(queries::count_entries(&self.db, user_id))
	}

	fn list_entries_page(
		&self,
		user_id: Uuid,
		offset: u64,
		limit: u32,
	) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>> {
		Box::pin(queries::list_entries_page(&self.db, user_id, offset, limit))
	}

	fn list_all_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>> {
		Box::pin(queries::list_all_entries(&self.db, user_id))
	}

	fn search_entries<'a>(
		&'a self,
		user_id: Uuid,
		search: &'a EntrySearch,
	) -> BoxFuture<'a, StorageResult<Vec<EntryRow>>> {
		Box::pin(queries::search_entries(&self.db, user_id, search))
	}

	fn get_entry(
		&self,
		user_id: Uuid,
		entry_id: Uuid,
	) -> BoxFuture<'_, StorageResult<Option<EntryRow>>> {
		Box::pin(queries::get_entry(&self.db, user_id, entry_id))
	}

	fn insert_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(queries::insert_entry(&self.db, entry))
	}

	fn update_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(queries::update_entry(&self.db, entry))
	}

	fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> BoxFuture<'_, StorageResult<()>> {
		Box::pin(queries::delete_entry(&self.db, user_id, entry_id))
	}

	fn list_tags(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagRow>>> {
		Box::pin(queries::list_tags(&self.db, user_id))
	}

	fn list_tag_colors(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagColorRow>>> {
		Box::pin(queries::list_tag_colors(&self.db, user_id))
	}

	fn upsert_tag_color<'a>(&'a self, color: &'a TagColorRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(queries::upsert_tag_color(&self.db, color))
	}

	fn latest_insight(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Option<InsightRow>>> {
		Box::pin(queries::latest_insight(&self.db, user_id))
	}

	fn insert_insight<'a>(&'a self, insight: &'a InsightRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(queries::insert_insight(&self.db, insight))
	}
}
