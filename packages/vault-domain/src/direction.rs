use regex::Regex;
use serde::{Deserialize, Serialize};

const ARABIC_BLOCK: &str = r"[\x{0600}-\x{06FF}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
	Ltr,
	Rtl,
}

pub fn contains_arabic(text: &str) -> bool {
	Regex::new(ARABIC_BLOCK).map(|re| re.is_match(text)).unwrap_or(false)
}

pub fn entry_direction(title: &str, content: &str) -> TextDirection {
	if contains_arabic(title) || contains_arabic(content) {
		TextDirection::Rtl
	} else {
		TextDirection::Ltr
	}
}
