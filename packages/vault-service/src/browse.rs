use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use vault_domain::{pagination::Pagination, tags::TagSet};

use crate::{
	CreateEntryRequest, Entry, Error, Insight, SearchRequest, UpdateEntryRequest, VaultService,
};

pub const NO_ANALYSIS: &str = "No analysis generated yet. Check back tomorrow!";
pub const ANALYSIS_FAILED: &str = "Failed to load analysis.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataVersion(u64);
impl DataVersion {
	pub fn initial() -> Self {
		Self(0)
	}

	pub fn next(self) -> Self {
		Self(self.0.saturating_add(1))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
	Success,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub title: String,
	pub message: String,
}
impl Notice {
	pub fn success(title: &str, message: &str) -> Self {
		Self { kind: NoticeKind::Success, title: title.to_string(), message: message.to_string() }
	}

	pub fn error(title: &str, message: impl Into<String>) -> Self {
		Self { kind: NoticeKind::Error, title: title.to_string(), message: message.into() }
	}

	pub fn from_error(title: &str, fallback: &str, err: &Error) -> Self {
		match err {
			Error::AuthRequired =>
				Self::error("Authentication Required", "Please sign in to continue."),
			Error::Configuration { .. } => Self::error(
				"Configuration Error",
				"The vault store is unavailable. Check the storage settings.",
			),
			Error::InvalidRequest { message, .. } => Self::error(title, message.clone()),
			Error::NotFound { .. } | Error::Storage { .. } => Self::error(title, fallback),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
	Idle,
	Ready,
	Failed(String),
}

pub struct EntryList {
	service: Arc<VaultService>,
	user: Option<Uuid>,
	pagination: Pagination,
	entries: Vec<Entry>,
	state: ListState,
	loaded_version: Option<DataVersion>,
}
impl EntryList {
	pub fn new(service: Arc<VaultService>, user: Option<Uuid>) -> Self {
		let pagination = Pagination::new(service.page_size());

		Self {
			service,
			user,
			pagination,
			entries: Vec::new(),
			state: ListState::Idle,
			loaded_version: None,
		}
	}

	pub fn pagination(&self) -> &Pagination {
		&self.pagination
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn state(&self) -> &ListState {
		&self.state
	}

	pub fn loaded_version(&self) -> Option<DataVersion> {
		self.loaded_version
	}

	pub async fn sync(&mut self, version: DataVersion) -> bool {
		if self.loaded_version == Some(version) {
			return false;
		}

		self.load(version).await;

		true
	}

	pub async fn go_to_page(&mut self, page: u64) -> bool {
		if !self.pagination.go_to_page(page) {
			return false;
		}

		self.reload().await;

		true
	}

	pub async fn next_page(&mut self) -> bool {
		let page = self.pagination.current_page().saturating_add(1);

		self.go_to_page(page).await
	}

	pub async fn prev_page(&mut self) -> bool {
		let page = self.pagination.current_page().saturating_sub(1);

		self.go_to_page(page).await
	}

	async fn reload(&mut self) {
		let version = self.loaded_version.unwrap_or_default();

		self.load(version).await;
	}

	pub async fn load(&mut self, version: DataVersion) {
		self.loaded_version = Some(version);

		match self.fetch().await {
			Ok(entries) => {
				self.entries = entries;
				self.state = ListState::Ready;
			},
			Err(err) => {
				tracing::error!(
					error = %err,
					page = self.pagination.current_page(),
					"Failed to load entries."
				);

				self.entries.clear();
				self.state = ListState::Failed(err.to_string());
			},
		}
	}

	async fn fetch(&mut self) -> crate::Result<Vec<Entry>> {
		let total = self.service.count_entries(self.user).await?;

		if self.pagination.set_total_count(total) {
			tracing::debug!(page = self.pagination.current_page(), total, "Clamped current page.");
		}

		self.service.fetch_page(self.user, self.pagination.offset(), self.pagination.limit()).await
	}
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
	pub query: String,
	pub tags: TagSet,
	results: Option<Vec<Entry>>,
}
impl SearchState {
	pub fn is_active(&self) -> bool {
		self.results.is_some()
	}

	pub fn results(&self) -> Option<&[Entry]> {
		self.results.as_deref()
	}

	pub fn request(&self) -> SearchRequest {
		SearchRequest { query: self.query.clone(), tags: self.tags.clone() }
	}

	pub fn clear(&mut self) {
		self.query.clear();
		self.tags.clear();
		self.results = None;
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisView {
	Ready { content: String, created_at: OffsetDateTime },
	Empty,
	Failed,
}
impl AnalysisView {
	pub fn message(&self) -> &str {
		match self {
			Self::Ready { content, .. } => content,
			Self::Empty => NO_ANALYSIS,
			Self::Failed => ANALYSIS_FAILED,
		}
	}
}

pub async fn load_analysis(service: &VaultService, user: Option<Uuid>) -> AnalysisView {
	match service.latest_insight(user).await {
		Ok(Some(Insight { content, created_at, .. })) =>
			AnalysisView::Ready { content, created_at },
		Ok(None) => AnalysisView::Empty,
		Err(err) => {
			tracing::error!(error = %err, "Failed to load latest insight.");

			AnalysisView::Failed
		},
	}
}

pub struct Browser {
	service: Arc<VaultService>,
	user: Option<Uuid>,
	version: DataVersion,
	list: EntryList,
	search: SearchState,
	notices: Vec<Notice>,
}
impl Browser {
	pub fn new(service: Arc<VaultService>, user: Option<Uuid>) -> Self {
		let list = EntryList::new(service.clone(), user);

		Self {
			service,
			user,
			version: DataVersion::initial(),
			list,
			search: SearchState::default(),
			notices: Vec::new(),
		}
	}

	pub fn service(&self) -> &Arc<VaultService> {
		&self.service
	}

	pub fn user(&self) -> Option<Uuid> {
		self.user
	}

	pub fn version(&self) -> DataVersion {
		self.version
	}

	pub fn list(&self) -> &EntryList {
		&self.list
	}

	pub fn list_mut(&mut self) -> &mut EntryList {
		&mut self.list
	}

	pub fn search(&self) -> &SearchState {
		&self.search
	}

	pub fn search_mut(&mut self) -> &mut SearchState {
		&mut self.search
	}

	pub fn visible(&self) -> &[Entry] {
		self.search.results().unwrap_or_else(|| self.list.entries())
	}

	pub fn take_notices(&mut self) -> Vec<Notice> {
		std::mem::take(&mut self.notices)
	}

	pub async fn refresh(&mut self) -> bool {
		self.list.sync(self.version).await
	}

	pub async fn reload(&mut self) {
		self.list.load(self.version).await;
	}

	pub async fn run_search(&mut self) -> bool {
		let req = self.search.request();

		if req.is_empty() {
			self.search.clear();

			return true;
		}

		match self.service.search_entries(self.user, &req).await {
			Ok(response) => {
				self.search.results = Some(response.entries);

				true
			},
			Err(err) => {
				tracing::error!(error = %err, "Search failed.");

				self.notices.push(Notice::from_error(
					"Search Error",
					"Could not perform search.",
					&err,
				));

				false
			},
		}
	}

	pub async fn search_for(&mut self, query: &str, tags: TagSet) -> bool {
		self.search.query = query.to_string();
		self.search.tags = tags;

		self.run_search().await
	}

	pub fn clear_search(&mut self) {
		self.search.clear();
	}

	pub async fn create_entry(&mut self, req: CreateEntryRequest) -> Option<Entry> {
		match self.service.create_entry(self.user, req).await {
			Ok(entry) => {
				self.notices
					.push(Notice::success("Entry Added", "Your knowledge vault has been updated."));
				self.after_write().await;

				Some(entry)
			},
			Err(err) => {
				tracing::error!(error = %err, "Failed to create entry.");

				self.notices.push(Notice::from_error(
					"An Error Occurred",
					"Could not save the entry.",
					&err,
				));

				None
			},
		}
	}

	pub async fn update_entry(&mut self, entry_id: Uuid, req: UpdateEntryRequest) -> Option<Entry> {
		match self.service.update_entry(self.user, entry_id, req).await {
			Ok(entry) => {
				self.notices.push(Notice::success(
					"Update Successful",
					"Your knowledge vault has been updated.",
				));
				self.after_write().await;

				Some(entry)
			},
			Err(err) => {
				tracing::error!(error = %err, %entry_id, "Failed to update entry.");

				self.notices.push(Notice::from_error(
					"An Error Occurred",
					"Could not save the entry.",
					&err,
				));

				None
			},
		}
	}

	pub async fn delete_entry(&mut self, entry_id: Uuid, confirmed: bool) -> bool {
		if !confirmed {
			return false;
		}

		match self.service.delete_entry(self.user, entry_id).await {
			Ok(()) => {
				self.notices.push(Notice::success(
					"Entry Deleted",
					"The entry has been removed from your vault.",
				));
				self.after_write().await;

				true
			},
			Err(err) => {
				tracing::error!(error = %err, %entry_id, "Failed to delete entry.");

				self.notices.push(Notice::from_error(
					"Deletion Failed",
					"Could not delete the entry. Please try again.",
					&err,
				));

				false
			},
		}
	}

	async fn after_write(&mut self) {
		self.version = self.version.next();

		self.list.sync(self.version).await;

		if self.search.is_active() {
			self.run_search().await;
		}
	}
}
