use sqlx::{Postgres, QueryBuilder, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{EntryRow, EntrySearch, InsightRow, TagColorRow, TagRow},
};

const ENTRY_COLUMNS: &str =
	"entry_id, user_id, title, content, tags, type, url, created_at, updated_at";

pub async fn count_entries(db: &Db, user_id: Uuid) -> Result<u64> {
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM entries WHERE user_id = $1")
		.bind(user_id)
		.fetch_one(&db.pool)
		.await?;

	Ok(count.max(0) as u64)
}

pub async fn list_entries_page(
	db: &Db,
	user_id: Uuid,
	offset: u64,
	limit: u32,
) -> Result<Vec<EntryRow>> {
	let offset = i64::try_from(offset)
		.map_err(|_| Error::InvalidArgument("Page offset is out of range.".to_string()))?;
	let sql = format!(
		"\
SELECT {ENTRY_COLUMNS}
FROM entries
WHERE user_id = $1
ORDER BY created_at DESC, entry_id DESC
LIMIT $2 OFFSET $3"
	);
	let rows = sqlx::query_as::<_, EntryRow>(&sql)
		.bind(user_id)
		.bind(i64::from(limit))
		.bind(offset)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

pub async fn list_all_entries(db: &Db, user_id: Uuid) -> Result<Vec<EntryRow>> {
	let sql = format!(
		"\
SELECT {ENTRY_COLUMNS}
FROM entries
WHERE user_id = $1
ORDER BY created_at DESC, entry_id DESC"
	);
	let rows = sqlx::query_as::<_, EntryRow>(&sql).bind(user_id).fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn search_entries(
	db: &Db,
	user_id: Uuid,
	search: &EntrySearch,
) -> Result<Vec<EntryRow>> {
	let mut builder = QueryBuilder::<Postgres>::new(format!(
		"SELECT {ENTRY_COLUMNS} FROM entries WHERE user_id = "
	));

	builder.push_bind(user_id);

	if let Some(text) = search.text.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
		let pattern = format!("%{}%", escape_like(text));

		builder.push(" AND (title ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR content ILIKE ");
		builder.push_bind(pattern);
		builder.push(")");
	}
	if !search.tags.is_empty() {
		builder.push(" AND tags @> ");
		builder.push_bind(search.tags.clone());
	}

	builder.push(" ORDER BY created_at DESC, entry_id DESC");

	let rows = builder.build_query_as::<EntryRow>().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn get_entry(db: &Db, user_id: Uuid, entry_id: Uuid) -> Result<Option<EntryRow>> {
	let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE entry_id = $1 AND user_id = $2");
	let row = sqlx::query_as::<_, EntryRow>(&sql)
		.bind(entry_id)
		.bind(user_id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn insert_entry(db: &Db, entry: &EntryRow) -> Result<()> {
	let mut tx = db.pool.begin().await?;
	let result = sqlx::query(
		"\
INSERT INTO entries (
	entry_id,
	user_id,
	title,
	content,
	tags,
	type,
	url,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
	)
	.bind(entry.entry_id)
	.bind(entry.user_id)
	.bind(entry.title.as_str())
	.bind(entry.content.as_str())
	.bind(&entry.tags)
	.bind(entry.kind.as_str())
	.bind(entry.url.as_deref())
	.bind(entry.created_at)
	.bind(entry.updated_at)
	.execute(&mut *tx)
	.await;

	match result {
		Ok(_) => {},
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
			return Err(Error::Conflict(format!("Entry {} already exists.", entry.entry_id)));
		},
		Err(err) => return Err(err.into()),
	}

	register_tags_tx(&mut tx, entry.user_id, &entry.tags, entry.updated_at).await?;
	tx.commit().await?;

	Ok(())
}

pub async fn update_entry(db: &Db, entry: &EntryRow) -> Result<()> {
	let mut tx = db.pool.begin().await?;
	let result = sqlx::query(
		"\
UPDATE entries
SET
	title = $1,
	content = $2,
	tags = $3,
	type = $4,
	url = $5,
	updated_at = $6
WHERE entry_id = $7 AND user_id = $8",
	)
	.bind(entry.title.as_str())
	.bind(entry.content.as_str())
	.bind(&entry.tags)
	.bind(entry.kind.as_str())
	.bind(entry.url.as_deref())
	.bind(entry.updated_at)
	.bind(entry.entry_id)
	.bind(entry.user_id)
	.execute(&mut *tx)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("Entry {} does not exist.", entry.entry_id)));
	}

	register_tags_tx(&mut tx, entry.user_id, &entry.tags, entry.updated_at).await?;
	tx.commit().await?;

	Ok(())
}

pub async fn delete_entry(db: &Db, user_id: Uuid, entry_id: Uuid) -> Result<()> {
	let result = sqlx::query("DELETE FROM entries WHERE entry_id = $1 AND user_id = $2")
		.bind(entry_id)
		.bind(user_id)
		.execute(&db.pool)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("Entry {entry_id} does not exist.")));
	}

	Ok(())
}

async fn register_tags_tx(
	tx: &mut Transaction<'_, Postgres>,
	user_id: Uuid,
	tags: &[String],
	now: OffsetDateTime,
) -> Result<()> {
	if tags.is_empty() {
		return Ok(());
	}

	sqlx::query(
		"\
INSERT INTO tags (user_id, name, created_at)
SELECT $1, name, $3
FROM unnest($2::text[]) AS name
ON CONFLICT (user_id, name) DO NOTHING",
	)
	.bind(user_id)
	.bind(tags)
	.bind(now)
	.execute(&mut **tx)
	.await?;

	Ok(())
}

pub async fn list_tags(db: &Db, user_id: Uuid) -> Result<Vec<TagRow>> {
	let rows = sqlx::query_as::<_, TagRow>(
		"SELECT user_id, name, created_at FROM tags WHERE user_id = $1 ORDER BY name",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_tag_colors(db: &Db, user_id: Uuid) -> Result<Vec<TagColorRow>> {
	let rows = sqlx::query_as::<_, TagColorRow>(
		"\
SELECT user_id, tag_name, background_color, border_color, text_color, updated_at
FROM tag_colors
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn upsert_tag_color(db: &Db, color: &TagColorRow) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO tag_colors (user_id, tag_name, background_color, border_color, text_color, updated_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (user_id, tag_name) DO UPDATE
SET
	background_color = EXCLUDED.background_color,
	border_color = EXCLUDED.border_color,
	text_color = EXCLUDED.text_color,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(color.user_id)
	.bind(color.tag_name.as_str())
	.bind(color.background_color.as_str())
	.bind(color.border_color.as_str())
	.bind(color.text_color.as_str())
	.bind(color.updated_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn latest_insight(db: &Db, user_id: Uuid) -> Result<Option<InsightRow>> {
	let row = sqlx::query_as::<_, InsightRow>(
		"\
SELECT insight_id, user_id, content, created_at
FROM insights
WHERE user_id = $1
ORDER BY created_at DESC, insight_id DESC
LIMIT 1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn insert_insight(db: &Db, insight: &InsightRow) -> Result<()> {
	sqlx::query(
		"INSERT INTO insights (insight_id, user_id, content, created_at) VALUES ($1, $2, $3, $4)",
	)
	.bind(insight.insight_id)
	.bind(insight.user_id)
	.bind(insight.content.as_str())
	.bind(insight.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Escapes `LIKE` metacharacters so user text matches literally. Postgres' default escape
/// character is the backslash.
pub fn escape_like(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for ch in text.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(escape_like("100%"), "100\\%");
		assert_eq!(escape_like("snake_case"), "snake\\_case");
		assert_eq!(escape_like("a\\b"), "a\\\\b");
		assert_eq!(escape_like("plain text"), "plain text");
	}
}
