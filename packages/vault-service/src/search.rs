use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vault_domain::tags::TagSet;
use vault_storage::models::EntrySearch;

use crate::{Entry, Result, VaultService, require_user};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: String,
	#[serde(default)]
	pub tags: TagSet,
}
impl SearchRequest {
	/// A blank query with no tags means "clear search", not "match everything".
	pub fn is_empty(&self) -> bool {
		self.query.trim().is_empty() && self.tags.is_empty()
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub active: bool,
	pub entries: Vec<Entry>,
}

impl VaultService {
	pub async fn search_entries(
		&self,
		user: Option<Uuid>,
		req: &SearchRequest,
	) -> Result<SearchResponse> {
		let user_id = require_user(user)?;

		if req.is_empty() {
			return Ok(SearchResponse { active: false, entries: Vec::new() });
		}

		let query = req.query.trim();
		let search = EntrySearch {
			text: (!query.is_empty()).then(|| query.to_string()),
			tags: req.tags.as_slice().to_vec(),
		};
		let rows = self.store.search_entries(user_id, &search).await?;

		tracing::debug!(
			user_id = %user_id,
			tags = search.tags.len(),
			hits = rows.len(),
			"Search completed."
		);

		let entries = rows.into_iter().map(Entry::from_row).collect::<Result<Vec<_>>>()?;

		Ok(SearchResponse { active: true, entries })
	}
}
