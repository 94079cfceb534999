use std::collections::HashMap;

use vault_domain::{
	entry::{self, EntryDraft, EntryKind},
	pagination::Pagination,
	tag_colors::{self, TagColor},
	tags::TagSet,
};

#[test]
fn tag_set_serializes_as_plain_list() {
	let set: TagSet = ["AI", "ai", "Life"].into_iter().collect();
	let json = serde_json::to_value(&set).expect("Failed to serialize tag set.");

	assert_eq!(json, serde_json::json!(["AI", "Life"]));

	let parsed: TagSet =
		serde_json::from_value(serde_json::json!(["x", "X", " y "])).expect("Failed to parse.");

	assert_eq!(parsed.into_vec(), vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn tag_color_record_deserializes_from_store_shape() {
	let color: TagColor = serde_json::from_value(serde_json::json!({
		"background_color": "bg-rose-500/10",
		"border_color": "border-rose-500/20",
		"text_color": "text-rose-400"
	}))
	.expect("Failed to parse tag color.");
	let mut colors = HashMap::new();

	colors.insert("READ".to_string(), color);

	let classes = tag_colors::tag_color_classes("READ", &colors);

	assert_eq!(classes.to_string(), "bg-rose-500/10 border-rose-500/20 text-rose-400");
}

#[test]
fn entry_kind_uses_store_spelling() {
	assert_eq!(serde_json::to_value(EntryKind::Link).expect("serialize"), "LINK");
	assert_eq!(
		serde_json::from_value::<EntryKind>(serde_json::json!("TEXT")).expect("deserialize"),
		EntryKind::Text
	);
}

#[test]
fn untitled_draft_is_accepted() {
	let cfg = vault_config::Vault::default();
	let draft = EntryDraft { title: "", content: "hello", kind: EntryKind::Text, url: None };

	assert!(entry::validate_draft(&draft, &cfg).is_ok());
	assert_eq!(entry::display_title(draft.title), "Untitled");
}

#[test]
fn default_page_size_walks_a_large_vault() {
	let mut pagination = Pagination::new(vault_config::DEFAULT_PAGE_SIZE);

	pagination.set_total_count(100);

	let mut visited = vec![pagination.current_page()];

	while pagination.next_page() {
		visited.push(pagination.current_page());
	}

	assert_eq!(visited, vec![1, 2, 3, 4, 5]);
	assert_eq!(pagination.showing(), Some((97, 100)));
}
