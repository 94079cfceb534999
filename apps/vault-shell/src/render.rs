use std::collections::HashMap;

use time::OffsetDateTime;

use vault_domain::{
	direction::TextDirection,
	pagination::Pagination,
	relative_time,
	tag_colors::{self, TagColor},
};
use vault_service::{Dashboard, Entry, TagView, browse::Notice};

pub fn entry_row(row: usize, entry: &Entry, now: OffsetDateTime) -> String {
	let mut line = format!("{row:>3}. {}", entry.display_title);

	if !entry.tags.is_empty() {
		line.push_str(&format!(" [{}]", entry.tags.join(", ")));
	}

	line.push_str(&format!(" · {}", relative_time::time_ago(entry.created_at, now)));

	line
}

pub fn page_footer(pagination: &Pagination) -> String {
	let Some((from, to)) = pagination.showing() else {
		return "No entries yet. Use `add` to capture one.".to_string();
	};
	let pages = pagination
		.page_numbers()
		.into_iter()
		.map(|page| {
			if page == pagination.current_page() { format!("[{page}]") } else { page.to_string() }
		})
		.collect::<Vec<_>>()
		.join(" ");

	format!("Showing {from}-{to} of {} · page {pages}", pagination.total_count())
}

pub fn entry_detail(
	entry: &Entry,
	colors: &HashMap<String, TagColor>,
	now: OffsetDateTime,
) -> Vec<String> {
	let mut lines = vec![
		format!("# {}", entry.display_title),
		format!("id: {}", entry.id),
		format!("type: {}", entry.kind),
		format!("created: {}", relative_time::time_ago(entry.created_at, now)),
	];

	if let Some(url) = &entry.url {
		lines.push(format!("url: {url}"));
	}
	if entry.direction == TextDirection::Rtl {
		lines.push("direction: rtl".to_string());
	}

	for tag in &entry.tags {
		lines.push(format!("tag: {tag} ({})", tag_colors::tag_color_classes(tag, colors)));
	}

	lines.push(String::new());
	lines.extend(entry.content.lines().map(str::to_string));

	lines
}

pub fn tag_line(tag: &TagView) -> String {
	let marker = if tag.custom { " *" } else { "" };

	format!("{}{marker} ({})", tag.name, tag.classes)
}

pub fn notice(notice: &Notice) -> String {
	format!("{}: {}", notice.title, notice.message)
}

pub fn dashboard(dashboard: &Dashboard, now: OffsetDateTime) -> Vec<String> {
	let insight = match dashboard.latest_insight_at {
		Some(at) => relative_time::time_ago(at, now),
		None => "never".to_string(),
	};

	vec![
		format!("entries: {}", dashboard.entry_count),
		format!("tags: {}", dashboard.tag_count),
		format!("latest analysis: {insight}"),
	]
}
