use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use vault_storage::{
	Error as StorageError, Result as StorageResult,
	models::{EntryRow, EntrySearch, InsightRow, TagColorRow, TagRow},
};

use crate::{BoxFuture, store::EntryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
	Unavailable,
	Backend,
}

#[derive(Default)]
struct MemoryState {
	entries: Vec<EntryRow>,
	tags: Vec<TagRow>,
	colors: Vec<TagColorRow>,
	insights: Vec<InsightRow>,
	failure: Option<Failure>,
}

#[derive(Default)]
pub struct MemoryStore {
	state: Mutex<MemoryState>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_failure(&self, failure: Option<Failure>) {
		self.lock().failure = failure;
	}

	pub fn entry_count(&self) -> usize {
		self.lock().entries.len()
	}

	fn lock(&self) -> MutexGuard<'_, MemoryState> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn run<T, F>(&self, op: F) -> StorageResult<T>
	where
		F: FnOnce(&mut MemoryState) -> StorageResult<T>,
	{
		let mut state = self.lock();

		match state.failure {
			Some(Failure::Unavailable) => Err(StorageError::Sqlx(sqlx::Error::PoolClosed)),
			Some(Failure::Backend) => Err(StorageError::Sqlx(sqlx::Error::Protocol(
				"Injected backend failure.".to_string(),
			))),
			None => op(&mut state),
		}
	}
}

impl MemoryState {
	fn sorted_entries(&self, user_id: Uuid) -> Vec<EntryRow> {
		let mut rows =
			self.entries.iter().filter(|row| row.user_id == user_id).cloned().collect::<Vec<_>>();

		rows.sort_by(|a, b| {
			b.created_at.cmp(&a.created_at).then_with(|| b.entry_id.cmp(&a.entry_id))
		});

		rows
	}

	fn register_tags(&mut self, entry: &EntryRow) {
		for name in &entry.tags {
			let known =
				self.tags.iter().any(|tag| tag.user_id == entry.user_id && &tag.name == name);

			if !known {
				self.tags.push(TagRow {
					user_id: entry.user_id,
					name: name.clone(),
					created_at: entry.updated_at,
				});
			}
		}
	}
}

fn matches_search(row: &EntryRow, search: &EntrySearch) -> bool {
	let text_matches = match search.text.as_deref().map(str::trim).filter(|text| !text.is_empty())
	{
		Some(text) => {
			let needle = text.to_lowercase();

			row.title.to_lowercase().contains(&needle)
				|| row.content.to_lowercase().contains(&needle)
		},
		None => true,
	};

	text_matches && search.tags.iter().all(|tag| row.tags.contains(tag))
}

impl EntryStore for MemoryStore {
	fn count_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<u64>> {
		Box::pin(async move {
			self.run(|state| {
				Ok(state.entries.iter().filter(|row| row.user_id == user_id).count() as u64)
			})
		})
	}

	fn list_entries_page(
		&self,
		user_id: Uuid,
		offset: u64,
		limit: u32,
	) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>> {
		Box::pin(async move {
			self.run(|state| {
				let offset = usize::try_from(offset).map_err(|_| {
					StorageError::InvalidArgument("Page offset is out of range.".to_string())
				})?;

				Ok(state
					.sorted_entries(user_id)
					.into_iter()
					.skip(offset)
					.take(limit as usize)
					.collect())
			})
		})
	}

	fn list_all_entries(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<EntryRow>>> {
		Box::pin(async move { self.run(|state| Ok(state.sorted_entries(user_id))) })
	}

	fn search_entries<'a>(
		&'a self,
		user_id: Uuid,
		search: &'a EntrySearch,
	) -> BoxFuture<'a, StorageResult<Vec<EntryRow>>> {
		Box::pin(async move {
			self.run(|state| {
				Ok(state
					.sorted_entries(user_id)
					.into_iter()
					.filter(|row| matches_search(row, search))
					.collect())
			})
		})
	}

	fn get_entry(
		&self,
		user_id: Uuid,
		entry_id: Uuid,
	) -> BoxFuture<'_, StorageResult<Option<EntryRow>>> {
		Box::pin(async move {
			self.run(|state| {
				Ok(state
					.entries
					.iter()
					.find(|row| row.entry_id == entry_id && row.user_id == user_id)
					.cloned())
			})
		})
	}

	fn insert_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(async move {
			self.run(|state| {
				if state.entries.iter().any(|row| row.entry_id == entry.entry_id) {
					return Err(StorageError::Conflict(format!(
						"Entry {} already exists.",
						entry.entry_id
					)));
				}

				state.entries.push(entry.clone());
				state.register_tags(entry);

				Ok(())
			})
		})
	}

	fn update_entry<'a>(&'a self, entry: &'a EntryRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(async move {
			self.run(|state| {
				let Some(row) = state
					.entries
					.iter_mut()
					.find(|row| row.entry_id == entry.entry_id && row.user_id == entry.user_id)
				else {
					return Err(StorageError::NotFound(format!(
						"Entry {} does not exist.",
						entry.entry_id
					)));
				};

				row.title = entry.title.clone();
				row.content = entry.content.clone();
				row.tags = entry.tags.clone();
				row.kind = entry.kind.clone();
				row.url = entry.url.clone();
				row.updated_at = entry.updated_at;

				state.register_tags(entry);

				Ok(())
			})
		})
	}

	fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> BoxFuture<'_, StorageResult<()>> {
		Box::pin(async move {
			self.run(|state| {
				let before = state.entries.len();

				state.entries.retain(|row| !(row.entry_id == entry_id && row.user_id == user_id));

				if state.entries.len() == before {
					return Err(StorageError::NotFound(format!("Entry {entry_id} does not exist.")));
				}

				Ok(())
			})
		})
	}

	fn list_tags(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagRow>>> {
		Box::pin(async move {
			self.run(|state| {
				let mut tags = state
					.tags
					.iter()
					.filter(|tag| tag.user_id == user_id)
					.cloned()
					.collect::<Vec<_>>();

				tags.sort_by(|a, b| a.name.cmp(&b.name));

				Ok(tags)
			})
		})
	}

	fn list_tag_colors(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Vec<TagColorRow>>> {
		Box::pin(async move {
			self.run(|state| {
				Ok(state.colors.iter().filter(|color| color.user_id == user_id).cloned().collect())
			})
		})
	}

	fn upsert_tag_color<'a>(&'a self, color: &'a TagColorRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(async move {
			self.run(|state| {
				state.colors.retain(|row| {
					!(row.user_id == color.user_id && row.tag_name == color.tag_name)
				});
				state.colors.push(color.clone());

				Ok(())
			})
		})
	}

	fn latest_insight(&self, user_id: Uuid) -> BoxFuture<'_, StorageResult<Option<InsightRow>>> {
		Box::pin(async move {
			self.run(|state| {
				Ok(state
					.insights
					.iter()
					.filter(|insight| insight.user_id == user_id)
					.max_by(|a, b| {
						a.created_at
							.cmp(&b.created_at)
							.then_with(|| a.insight_id.cmp(&b.insight_id))
					})
					.cloned())
			})
		})
	}

	fn insert_insight<'a>(&'a self, insight: &'a InsightRow) -> BoxFuture<'a, StorageResult<()>> {
		Box::pin(async move {
			self.run(|state| {
				state.insights.push(insight.clone());

				Ok(())
			})
		})
	}
}
