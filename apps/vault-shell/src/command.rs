use uuid::Uuid;

use vault_domain::{entry::EntryKind, tags::TagSet};

pub const HELP: &str = "\
Commands:
  list                                  Reload and show the current page
  next | prev | page N                  Move between pages
  search [--tag T]... [WORDS...]        Search title/content and filter by tags
  clear                                 Leave search results
  add [--title T] [--tag T]... [--url U] [--link] CONTENT...
  edit REF [--title T] [--tag T]... [--url U] [CONTENT...]
  delete REF --yes                      Delete an entry
  show REF                              Show one entry in full
  read [next|prev]                      Step through every entry, newest first
  insight                               Show the latest analysis
  tags [FRAGMENT]                       List tags, or suggestions matching FRAGMENT
  color TAG BACKGROUND BORDER TEXT      Store display classes for a tag
  dashboard                             Entry and tag counts
  help | quit

REF is a row number from the last listing or an entry id.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
	Row(usize),
	Id(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStep {
	Start,
	Next,
	Prev,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
	pub title: Option<String>,
	pub tags: Vec<String>,
	pub url: Option<String>,
	pub kind: Option<EntryKind>,
	pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	List,
	Next,
	Prev,
	Page(u64),
	Search { query: String, tags: TagSet },
	Clear,
	Add(EntryFields),
	Edit(EntryRef, EntryFields),
	Delete { target: EntryRef, confirmed: bool },
	Show(EntryRef),
	Read(ReadStep),
	Insight,
	Tags(Option<String>),
	Color { tag: String, background: String, border: String, text: String },
	Dashboard,
	Help,
	Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
	let words = split_words(line)?;
	let Some((head, rest)) = words.split_first() else {
		return Ok(None);
	};
	let command = match head.as_str() {
		"list" | "ls" => Command::List,
		"next" | "n" => Command::Next,
		"prev" | "p" => Command::Prev,
		"page" => {
			let [page] = rest else {
				return Err("usage: page N".to_string());
			};

			Command::Page(page.parse().map_err(|_| format!("Not a page number: {page}."))?)
		},
		"search" | "s" => {
			let fields = parse_fields(rest, &["--tag"])?;

			Command::Search {
				query: fields.content.unwrap_or_default(),
				tags: TagSet::from_iter(&fields.tags),
			}
		},
		"clear" => Command::Clear,
		"add" => {
			let fields = parse_fields(rest, &["--title", "--tag", "--url", "--link"])?;

			if fields.content.is_none() {
				return Err("usage: add [--title T] [--tag T]... [--url U] CONTENT...".to_string());
			}

			Command::Add(fields)
		},
		"edit" => {
			let Some((target, rest)) = rest.split_first() else {
				return Err("usage: edit REF [--title T] [--tag T]... [--url U] [CONTENT...]"
					.to_string());
			};

			Command::Edit(
				parse_ref(target)?,
				parse_fields(rest, &["--title", "--tag", "--url", "--link"])?,
			)
		},
		"delete" | "rm" => {
			let mut target = None;
			let mut confirmed = false;

			for word in rest {
				match word.as_str() {
					"--yes" | "-y" => confirmed = true,
					other if target.is_none() => target = Some(parse_ref(other)?),
					other => return Err(format!("Unexpected argument: {other}.")),
				}
			}

			let Some(target) = target else {
				return Err("usage: delete REF --yes".to_string());
			};

			Command::Delete { target, confirmed }
		},
		"show" => {
			let [target] = rest else {
				return Err("usage: show REF".to_string());
			};

			Command::Show(parse_ref(target)?)
		},
		"read" => match rest {
			[] => Command::Read(ReadStep::Start),
			[step] if step == "next" => Command::Read(ReadStep::Next),
			[step] if step == "prev" => Command::Read(ReadStep::Prev),
			_ => return Err("usage: read [next|prev]".to_string()),
		},
		"insight" => Command::Insight,
		"tags" => Command::Tags((!rest.is_empty()).then(|| rest.join(" "))),
		"color" => {
			let [tag, background, border, text] = rest else {
				return Err("usage: color TAG BACKGROUND BORDER TEXT".to_string());
			};

			Command::Color {
				tag: tag.clone(),
				background: background.clone(),
				border: border.clone(),
				text: text.clone(),
			}
		},
		"dashboard" | "stats" => Command::Dashboard,
		"help" | "?" => Command::Help,
		"quit" | "exit" | "q" => Command::Quit,
		other => return Err(format!("Unknown command: {other}. Type `help` for a list.")),
	};

	Ok(Some(command))
}

fn parse_ref(raw: &str) -> Result<EntryRef, String> {
	if let Ok(row) = raw.parse::<usize>() {
		if row == 0 {
			return Err("Row numbers start at 1.".to_string());
		}

		return Ok(EntryRef::Row(row));
	}

	Uuid::parse_str(raw)
		.map(EntryRef::Id)
		.map_err(|_| format!("Not a row number or entry id: {raw}."))
}

fn parse_fields(words: &[String], allowed: &[&str]) -> Result<EntryFields, String> {
	let mut fields = EntryFields::default();
	let mut content = Vec::new();
	let mut iter = words.iter();

	while let Some(word) = iter.next() {
		let flag = word.as_str();

		if !flag.starts_with("--") {
			content.push(word.as_str());

			continue;
		}
		if !allowed.contains(&flag) {
			return Err(format!("Unknown option: {flag}."));
		}
		if flag == "--link" {
			fields.kind = Some(EntryKind::Link);

			continue;
		}

		let Some(value) = iter.next() else {
			return Err(format!("{flag} needs a value."));
		};

		match flag {
			"--title" => fields.title = Some(value.clone()),
			"--tag" => fields.tags.push(value.clone()),
			"--url" => fields.url = Some(value.clone()),
			_ => return Err(format!("Unknown option: {flag}.")),
		}
	}

	if !content.is_empty() {
		fields.content = Some(content.join(" "));
	}

	Ok(fields)
}

pub fn split_words(line: &str) -> Result<Vec<String>, String> {
	let mut words = Vec::new();
	let mut current = String::new();
	let mut quote = None;
	let mut in_word = false;

	for ch in line.chars() {
		match (quote, ch) {
			(Some(open), ch) if ch == open => quote = None,
			(Some(_), ch) => current.push(ch),
			(None, '"' | '\'') => {
				quote = Some(ch);
				in_word = true;
			},
			(None, ch) if ch.is_whitespace() =>
				if in_word {
					words.push(std::mem::take(&mut current));
					in_word = false;
				},
			(None, ch) => {
				current.push(ch);
				in_word = true;
			},
		}
	}

	if quote.is_some() {
		return Err("Unterminated quote.".to_string());
	}
	if in_word {
		words.push(current);
	}

	Ok(words)
}
