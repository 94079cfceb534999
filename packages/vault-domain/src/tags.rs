use serde::{Deserialize, Serialize};

pub fn normalize_tag(raw: &str) -> Option<String> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
	tags: Vec<String>,
}
impl TagSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, raw: &str) -> bool {
		let Some(tag) = normalize_tag(raw) else {
			return false;
		};

		if self.contains_ignore_case(&tag) {
			return false;
		}

		self.tags.push(tag);

		true
	}

	pub fn remove(&mut self, tag: &str) -> bool {
		let before = self.tags.len();

		self.tags.retain(|existing| existing != tag);

		self.tags.len() != before
	}

	pub fn contains_ignore_case(&self, tag: &str) -> bool {
		let needle = tag.to_lowercase();

		self.tags.iter().any(|existing| existing.to_lowercase() == needle)
	}

	pub fn clear(&mut self) {
		self.tags.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn as_slice(&self) -> &[String] {
		&self.tags
	}

	pub fn into_vec(self) -> Vec<String> {
		self.tags
	}
}
impl<S> FromIterator<S> for TagSet
where
	S: AsRef<str>,
{
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut set = Self::new();

		for tag in iter {
			set.add(tag.as_ref());
		}

		set
	}
}
impl From<Vec<String>> for TagSet {
	fn from(tags: Vec<String>) -> Self {
		tags.into_iter().collect()
	}
}
impl From<TagSet> for Vec<String> {
	fn from(set: TagSet) -> Self {
		set.tags
	}
}

pub fn suggestions<'a>(known: &'a [String], selected: &TagSet) -> Vec<&'a str> {
	known
		.iter()
		.filter(|tag| !selected.contains_ignore_case(tag))
		.map(String::as_str)
		.collect()
}

pub fn filter_by_fragment<'a>(
	known: &'a [String],
	fragment: &str,
	selected: &TagSet,
) -> Vec<&'a str> {
	let needle = fragment.trim().to_lowercase();

	known
		.iter()
		.filter(|tag| tag.to_lowercase().contains(&needle))
		.filter(|tag| !selected.contains_ignore_case(tag))
		.map(String::as_str)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_rejects_case_insensitive_duplicate() {
		let mut set = TagSet::new();

		assert!(set.add("AI"));
		assert!(!set.add("ai"));
		assert!(!set.add("  Ai "));
		assert_eq!(set.as_slice(), ["AI".to_string()]);
	}

	#[test]
	fn add_trims_and_rejects_blank() {
		let mut set = TagSet::new();

		assert!(!set.add("   "));
		assert!(set.add("  Research  "));
		assert_eq!(set.as_slice(), ["Research".to_string()]);
	}

	#[test]
	fn remove_is_exact() {
		let mut set: TagSet = ["WORK", "LIFE"].into_iter().collect();

		assert!(!set.remove("work"));
		assert!(set.remove("WORK"));
		assert_eq!(set.as_slice(), ["LIFE".to_string()]);
	}

	#[test]
	fn collecting_keeps_first_spelling_and_order() {
		let set: TagSet = ["b", "A", "a", "B", "c"].into_iter().collect();

		assert_eq!(set.into_vec(), vec!["b".to_string(), "A".to_string(), "c".to_string()]);
	}

	#[test]
	fn suggestions_skip_selected() {
		let known = vec!["AI".to_string(), "Life".to_string(), "Work".to_string()];
		let selected: TagSet = ["life"].into_iter().collect();

		assert_eq!(suggestions(&known, &selected), vec!["AI", "Work"]);
	}

	#[test]
	fn fragment_filter_is_case_insensitive() {
		let known = vec!["Research".to_string(), "READ".to_string(), "Work".to_string()];
		let selected: TagSet = ["read"].into_iter().collect();

		assert_eq!(filter_by_fragment(&known, "rE", &selected), vec!["Research"]);
		assert_eq!(filter_by_fragment(&known, "", &TagSet::new()).len(), 3);
	}
}
