use std::{fmt, str::FromStr};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";

const URL_PATTERN: &str = r"(?i)^https?://\S+$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
	Text,
	Link,
}
impl EntryKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Text => "TEXT",
			Self::Link => "LINK",
		}
	}
}
impl fmt::Display for EntryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for EntryKind {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"TEXT" => Ok(Self::Text),
			"LINK" => Ok(Self::Link),
			other => Err(format!("Unknown entry type {other:?}.")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectCode {
	RejectEmptyContent,
	RejectTitleTooLong,
	RejectContentTooLong,
	RejectMissingUrl,
	RejectInvalidUrl,
}
impl RejectCode {
	pub fn field(&self) -> &'static str {
		match self {
			Self::RejectEmptyContent | Self::RejectContentTooLong => "$.content",
			Self::RejectTitleTooLong => "$.title",
			Self::RejectMissingUrl | Self::RejectInvalidUrl => "$.url",
		}
	}

	pub fn message(&self) -> &'static str {
		match self {
			Self::RejectEmptyContent => "Content cannot be empty.",
			Self::RejectTitleTooLong => "Title is too long.",
			Self::RejectContentTooLong => "Content is too long.",
			Self::RejectMissingUrl => "A link entry requires a URL.",
			Self::RejectInvalidUrl => "URL must start with http:// or https://.",
		}
	}
}

pub struct EntryDraft<'a> {
	pub title: &'a str,
	pub content: &'a str,
	pub kind: EntryKind,
	pub url: Option<&'a str>,
}

pub fn validate_draft(draft: &EntryDraft<'_>, cfg: &vault_config::Vault) -> Result<(), RejectCode> {
	if draft.content.trim().is_empty() {
		return Err(RejectCode::RejectEmptyContent);
	}
	if draft.title.chars().count() as u64 > u64::from(cfg.max_title_chars) {
		return Err(RejectCode::RejectTitleTooLong);
	}
	if draft.content.chars().count() as u64 > u64::from(cfg.max_content_chars) {
		return Err(RejectCode::RejectContentTooLong);
	}

	match (draft.kind, draft.url.map(str::trim).filter(|url| !url.is_empty())) {
		(EntryKind::Link, None) => Err(RejectCode::RejectMissingUrl),
		(_, Some(url)) if !looks_like_url(url) => Err(RejectCode::RejectInvalidUrl),
		_ => Ok(()),
	}
}

pub fn infer_kind(url: Option<&str>) -> EntryKind {
	match url.map(str::trim) {
		Some(url) if !url.is_empty() => EntryKind::Link,
		_ => EntryKind::Text,
	}
}

pub fn looks_like_url(text: &str) -> bool {
	Regex::new(URL_PATTERN).map(|re| re.is_match(text.trim())).unwrap_or(false)
}

pub fn display_title(title: &str) -> &str {
	if title.trim().is_empty() { UNTITLED } else { title }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn vault_cfg() -> vault_config::Vault {
		vault_config::Vault { page_size: 24, max_title_chars: 10, max_content_chars: 20 }
	}

	fn draft<'a>(title: &'a str, content: &'a str) -> EntryDraft<'a> {
		EntryDraft { title, content, kind: EntryKind::Text, url: None }
	}

	#[test]
	fn blank_title_displays_untitled() {
		assert_eq!(display_title(""), "Untitled");
		assert_eq!(display_title("   "), "Untitled");
		assert_eq!(display_title("Notes"), "Notes");
	}

	#[test]
	fn rejects_blank_content() {
		assert_eq!(
			validate_draft(&draft("t", " \n\t"), &vault_cfg()),
			Err(RejectCode::RejectEmptyContent)
		);
		assert_eq!(validate_draft(&draft("", "hello"), &vault_cfg()), Ok(()));
	}

	#[test]
	fn enforces_length_limits_in_chars() {
		assert_eq!(
			validate_draft(&draft("this title is long", "x"), &vault_cfg()),
			Err(RejectCode::RejectTitleTooLong)
		);
		assert_eq!(validate_draft(&draft("", &"é".repeat(20)), &vault_cfg()), Ok(()));
		assert_eq!(
			validate_draft(&draft("", &"é".repeat(21)), &vault_cfg()),
			Err(RejectCode::RejectContentTooLong)
		);
	}

	#[test]
	fn link_requires_valid_url() {
		let mut link = EntryDraft { title: "", content: "see", kind: EntryKind::Link, url: None };

		assert_eq!(validate_draft(&link, &vault_cfg()), Err(RejectCode::RejectMissingUrl));

		link.url = Some("ftp://x");

		assert_eq!(validate_draft(&link, &vault_cfg()), Err(RejectCode::RejectInvalidUrl));

		link.url = Some("https://example.com/a");

		assert_eq!(validate_draft(&link, &vault_cfg()), Ok(()));
	}

	#[test]
	fn kind_round_trips_through_strings() {
		assert_eq!("link".parse::<EntryKind>(), Ok(EntryKind::Link));
		assert_eq!(EntryKind::Text.to_string(), "TEXT");
		assert!("note".parse::<EntryKind>().is_err());
		assert_eq!(infer_kind(Some(" https://a.b ")), EntryKind::Link);
		assert_eq!(infer_kind(Some("  ")), EntryKind::Text);
	}
}
