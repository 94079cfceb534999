use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, VaultService, require_user};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
	pub entry_count: u64,
	pub tag_count: u64,
	#[serde(with = "crate::time_serde::option")]
	pub latest_insight_at: Option<OffsetDateTime>,
}

impl VaultService {
	pub async fn dashboard(&self, user: Option<Uuid>) -> Result<Dashboard> {
		let user_id = require_user(user)?;
		let entry_count = self.store.count_entries(user_id).await?;
		let tag_count = self.store.list_tags(user_id).await?.len() as u64;
		let latest_insight_at =
			self.store.latest_insight(user_id).await?.map(|insight| insight.created_at);

		Ok(Dashboard { entry_count, tag_count, latest_insight_at })
	}
}
