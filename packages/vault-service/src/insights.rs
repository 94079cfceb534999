use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use vault_storage::models::InsightRow;

use crate::{Error, Result, VaultService, require_user};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
	pub id: Uuid,
	pub content: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}
impl From<InsightRow> for Insight {
	fn from(row: InsightRow) -> Self {
		Self { id: row.insight_id, content: row.content, created_at: row.created_at }
	}
}

impl VaultService {
	pub async fn latest_insight(&self, user: Option<Uuid>) -> Result<Option<Insight>> {
		let user_id = require_user(user)?;

		Ok(self.store.latest_insight(user_id).await?.map(Insight::from))
	}

	pub async fn record_insight(&self, user: Option<Uuid>, content: &str) -> Result<Insight> {
		let user_id = require_user(user)?;
		let content = content.trim();

		if content.is_empty() {
			return Err(Error::invalid("Insight content cannot be empty.", "$.content"));
		}
		if content.chars().count() as u64 > u64::from(self.cfg.vault.max_content_chars) {
			return Err(Error::invalid("Insight content is too long.", "$.content"));
		}

		let row = InsightRow {
			insight_id: Uuid::new_v4(),
			user_id,
			content: content.to_string(),
			created_at: OffsetDateTime::now_utc(),
		};

		self.store.insert_insight(&row).await?;

		tracing::info!(insight_id = %row.insight_id, user_id = %user_id, "Insight recorded.");

		Ok(row.into())
	}
}
