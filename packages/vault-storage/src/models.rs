use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryRow {
	pub entry_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	#[sqlx(rename = "type")]
	pub kind: String,
	pub url: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRow {
	pub user_id: Uuid,
	pub name: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagColorRow {
	pub user_id: Uuid,
	pub tag_name: String,
	pub background_color: String,
	pub border_color: String,
	pub text_color: String,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InsightRow {
	pub insight_id: Uuid,
	pub user_id: Uuid,
	pub content: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct EntrySearch {
	pub text: Option<String>,
	pub tags: Vec<String>,
}
