use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

pub const PALETTE: [(&str, &str, &str); 10] = [
	("bg-red-500/10", "text-red-400", "border-red-500/20"),
	("bg-blue-500/10", "text-blue-400", "border-blue-500/20"),
	("bg-green-500/10", "text-green-400", "border-green-500/20"),
	("bg-amber-500/10", "text-amber-400", "border-amber-500/20"),
	("bg-purple-500/10", "text-purple-400", "border-purple-500/20"),
	("bg-pink-500/10", "text-pink-400", "border-pink-500/20"),
	("bg-indigo-500/10", "text-indigo-400", "border-indigo-500/20"),
	("bg-orange-500/10", "text-orange-400", "border-orange-500/20"),
	("bg-teal-500/10", "text-teal-400", "border-teal-500/20"),
	("bg-cyan-500/10", "text-cyan-400", "border-cyan-500/20"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagColor {
	pub background_color: String,
	pub border_color: String,
	pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagClasses {
	pub background: String,
	pub border: String,
	pub text: String,
}
impl From<&TagColor> for TagClasses {
	fn from(color: &TagColor) -> Self {
		Self {
			background: color.background_color.clone(),
			border: color.border_color.clone(),
			text: color.text_color.clone(),
		}
	}
}
impl fmt::Display for TagClasses {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.background, self.border, self.text)
	}
}

pub fn tag_color_classes(name: &str, colors: &HashMap<String, TagColor>) -> TagClasses {
	match colors.get(name) {
		Some(color) => TagClasses::from(color),
		None => default_tag_classes(name),
	}
}

pub fn default_tag_classes(name: &str) -> TagClasses {
	let (background, text, border) = PALETTE[palette_index(name)];

	TagClasses {
		background: background.to_string(),
		border: border.to_string(),
		text: text.to_string(),
	}
}

pub fn palette_index(name: &str) -> usize {
	(name_hash(name).unsigned_abs() % PALETTE.len() as u64) as usize
}

// `hash = unit + ((hash << 5) - hash)` over UTF-16 units. The shift sees the low 32 bits of the
// running value while the subtraction uses the full value.
fn name_hash(name: &str) -> i64 {
	let mut hash: i64 = 0;

	for unit in name.encode_utf16() {
		let shifted = (hash as i32).wrapping_shl(5);

		hash = i64::from(unit) + (i64::from(shifted) - hash);
	}

	hash
}
