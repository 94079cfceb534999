use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use vault_domain::{
	tag_colors::{self, TagClasses, TagColor},
	tags::{self, TagSet},
};
use vault_storage::models::TagColorRow;

use crate::{Error, Result, VaultService, require_user};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagView {
	pub name: String,
	pub classes: TagClasses,
	pub custom: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCatalogue {
	pub tags: Vec<TagView>,
}
impl TagCatalogue {
	pub fn names(&self) -> Vec<String> {
		self.tags.iter().map(|tag| tag.name.clone()).collect()
	}

	pub fn suggestions(&self, selected: &TagSet, fragment: &str) -> Vec<String> {
		let names = self.names();

		if fragment.trim().is_empty() {
			tags::suggestions(&names, selected).into_iter().map(str::to_string).collect()
		} else {
			tags::filter_by_fragment(&names, fragment, selected)
				.into_iter()
				.map(str::to_string)
				.collect()
		}
	}
}

impl VaultService {
	pub async fn list_tags(&self, user: Option<Uuid>) -> Result<Vec<String>> {
		let user_id = require_user(user)?;
		let rows = self.store.list_tags(user_id).await?;

		Ok(rows.into_iter().map(|row| row.name).collect())
	}

	pub async fn tag_colors(&self, user: Option<Uuid>) -> Result<HashMap<String, TagColor>> {
		let user_id = require_user(user)?;
		let rows = self.store.list_tag_colors(user_id).await?;

		Ok(rows
			.into_iter()
			.map(|row| {
				(
					row.tag_name,
					TagColor {
						background_color: row.background_color,
						border_color: row.border_color,
						text_color: row.text_color,
					},
				)
			})
			.collect())
	}

	pub async fn tag_catalogue(&self, user: Option<Uuid>) -> Result<TagCatalogue> {
		let names = self.list_tags(user).await?;
		let colors = self.tag_colors(user).await?;
		let tags = names
			.into_iter()
			.map(|name| TagView {
				classes: tag_colors::tag_color_classes(&name, &colors),
				custom: colors.contains_key(&name),
				name,
			})
			.collect();

		Ok(TagCatalogue { tags })
	}

	pub async fn set_tag_color(
		&self,
		user: Option<Uuid>,
		name: &str,
		color: TagColor,
	) -> Result<TagView> {
		let user_id = require_user(user)?;
		let Some(name) = tags::normalize_tag(name) else {
			return Err(Error::invalid("Tag name cannot be empty.", "$.name"));
		};

		for (field, value) in [
			("$.background_color", &color.background_color),
			("$.border_color", &color.border_color),
			("$.text_color", &color.text_color),
		] {
			if value.trim().is_empty() {
				return Err(Error::invalid("Color classes cannot be empty.", field));
			}
		}

		let row = TagColorRow {
			user_id,
			tag_name: name.clone(),
			background_color: color.background_color.trim().to_string(),
			border_color: color.border_color.trim().to_string(),
			text_color: color.text_color.trim().to_string(),
			updated_at: OffsetDateTime::now_utc(),
		};

		self.store.upsert_tag_color(&row).await?;

		tracing::info!(user_id = %user_id, tag = %name, "Tag color saved.");

		Ok(TagView {
			classes: TagClasses {
				background: row.background_color,
				border: row.border_color,
				text: row.text_color,
			},
			custom: true,
			name,
		})
	}
}
