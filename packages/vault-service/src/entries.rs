use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use vault_domain::{
	direction::{self, TextDirection},
	entry::{self, EntryDraft, EntryKind},
	pagination::Pagination,
	tags::TagSet,
};
use vault_storage::models::EntryRow;

use crate::{Error, Result, VaultService, require_user};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
	pub id: Uuid,
	pub title: String,
	pub display_title: String,
	pub content: String,
	pub tags: Vec<String>,
	#[serde(rename = "type")]
	pub kind: EntryKind,
	pub url: Option<String>,
	pub direction: TextDirection,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl Entry {
	pub fn from_row(row: EntryRow) -> Result<Self> {
		let kind = stored_kind(&row)?;

		Ok(Self {
			id: row.entry_id,
			display_title: entry::display_title(&row.title).to_string(),
			direction: direction::entry_direction(&row.title, &row.content),
			title: row.title,
			content: row.content,
			tags: row.tags,
			kind,
			url: row.url,
			created_at: row.created_at,
			updated_at: row.updated_at,
		})
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEntryRequest {
	#[serde(default)]
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default, rename = "type")]
	pub kind: Option<EntryKind>,
	#[serde(default)]
	pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
	pub title: Option<String>,
	pub content: Option<String>,
	pub tags: Option<Vec<String>>,
	#[serde(rename = "type")]
	pub kind: Option<EntryKind>,
	pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPage {
	pub entries: Vec<Entry>,
	pub page: u64,
	pub page_size: u32,
	pub total_count: u64,
	pub total_pages: u64,
	pub has_next: bool,
	pub has_prev: bool,
	pub page_numbers: Vec<u64>,
	pub showing_from: Option<u64>,
	pub showing_to: Option<u64>,
}
impl EntryPage {
	pub fn new(pagination: &Pagination, entries: Vec<Entry>) -> Self {
		let showing = pagination.showing();

		Self {
			entries,
			page: pagination.current_page(),
			page_size: pagination.page_size(),
			total_count: pagination.total_count(),
			total_pages: pagination.total_pages(),
			has_next: pagination.has_next(),
			has_prev: pagination.has_prev(),
			page_numbers: pagination.page_numbers(),
			showing_from: showing.map(|(from, _)| from),
			showing_to: showing.map(|(_, to)| to),
		}
	}
}

impl VaultService {
	pub async fn count_entries(&self, user: Option<Uuid>) -> Result<u64> {
		let user_id = require_user(user)?;

		Ok(self.store.count_entries(user_id).await?)
	}

	pub async fn fetch_page(
		&self,
		user: Option<Uuid>,
		offset: u64,
		limit: u32,
	) -> Result<Vec<Entry>> {
		let user_id = require_user(user)?;
		let rows = self.store.list_entries_page(user_id, offset, limit).await?;

		rows.into_iter().map(Entry::from_row).collect()
	}

	pub async fn list_entries(&self, user: Option<Uuid>, page: u64) -> Result<EntryPage> {
		let user_id = require_user(user)?;
		let mut pagination = Pagination::new(self.page_size());

		pagination.set_total_count(self.store.count_entries(user_id).await?);
		pagination.go_to_page(page.clamp(1, pagination.total_pages().max(1)));

		let entries =
			self.fetch_page(Some(user_id), pagination.offset(), pagination.limit()).await?;

		Ok(EntryPage::new(&pagination, entries))
	}

	pub async fn all_entries(&self, user: Option<Uuid>) -> Result<Vec<Entry>> {
		let user_id = require_user(user)?;
		let rows = self.store.list_all_entries(user_id).await?;

		rows.into_iter().map(Entry::from_row).collect()
	}

	pub async fn get_entry(&self, user: Option<Uuid>, entry_id: Uuid) -> Result<Entry> {
		let user_id = require_user(user)?;

		Entry::from_row(self.load_row(user_id, entry_id).await?)
	}

	pub async fn create_entry(&self, user: Option<Uuid>, req: CreateEntryRequest) -> Result<Entry> {
		let user_id = require_user(user)?;
		let title = req.title.trim().to_string();
		let url = clean_url(req.url.as_deref());
		let kind = req.kind.unwrap_or_else(|| entry::infer_kind(url.as_deref()));

		entry::validate_draft(
			&EntryDraft { title: &title, content: &req.content, kind, url: url.as_deref() },
			&self.cfg.vault,
		)?;

		let now = OffsetDateTime::now_utc();
		let row = EntryRow {
			entry_id: Uuid::new_v4(),
			user_id,
			title,
			content: req.content,
			tags: TagSet::from_iter(&req.tags).into_vec(),
			kind: kind.as_str().to_string(),
			url,
			created_at: now,
			updated_at: now,
		};

		self.store.insert_entry(&row).await?;

		tracing::info!(
			entry_id = %row.entry_id,
			user_id = %user_id,
			kind = %kind,
			"Entry created."
		);

		Entry::from_row(row)
	}

	pub async fn update_entry(
		&self,
		user: Option<Uuid>,
		entry_id: Uuid,
		req: UpdateEntryRequest,
	) -> Result<Entry> {
		let user_id = require_user(user)?;
		let mut row = self.load_row(user_id, entry_id).await?;

		if let Some(title) = req.title {
			row.title = title.trim().to_string();
		}
		if let Some(content) = req.content {
			row.content = content;
		}
		if let Some(tags) = req.tags {
			row.tags = TagSet::from_iter(&tags).into_vec();
		}
		if let Some(url) = req.url {
			row.url = clean_url(Some(&url));
		}

		let kind = match req.kind {
			Some(kind) => kind,
			None => stored_kind(&row)?,
		};

		entry::validate_draft(
			&EntryDraft {
				title: &row.title,
				content: &row.content,
				kind,
				url: row.url.as_deref(),
			},
			&self.cfg.vault,
		)?;

		row.kind = kind.as_str().to_string();
		row.updated_at = OffsetDateTime::now_utc();

		self.store.update_entry(&row).await?;

		tracing::info!(entry_id = %entry_id, user_id = %user_id, "Entry updated.");

		Entry::from_row(row)
	}

	pub async fn delete_entry(&self, user: Option<Uuid>, entry_id: Uuid) -> Result<()> {
		let user_id = require_user(user)?;

		self.store.delete_entry(user_id, entry_id).await?;

		tracing::info!(entry_id = %entry_id, user_id = %user_id, "Entry deleted.");

		Ok(())
	}

	async fn load_row(&self, user_id: Uuid, entry_id: Uuid) -> Result<EntryRow> {
		self.store
			.get_entry(user_id, entry_id)
			.await?
			.ok_or_else(|| Error::NotFound { message: format!("Entry {entry_id} does not exist.") })
	}
}

fn clean_url(raw: Option<&str>) -> Option<String> {
	raw.map(str::trim).filter(|url| !url.is_empty()).map(str::to_string)
}

fn stored_kind(row: &EntryRow) -> Result<EntryKind> {
	row.kind.parse::<EntryKind>().map_err(|message| Error::Storage {
		message: format!("Entry {} has an unreadable type: {message}", row.entry_id),
	})
}
