use std::{io::Write, sync::Arc};

use time::OffsetDateTime;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use uuid::Uuid;

use vault_domain::reading::ReadingCursor;
use vault_service::{
	CreateEntryRequest, Entry, Error, UpdateEntryRequest, VaultService,
	browse::{self, AnalysisView, Browser, ListState, Notice},
};

use crate::{
	command::{self, Command, EntryFields, EntryRef, HELP, ReadStep},
	render,
};

const PROMPT: &str = "vault> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

struct Reading {
	entries: Vec<Entry>,
	cursor: ReadingCursor,
}

pub struct Shell<W> {
	browser: Browser,
	reading: Option<Reading>,
	out: W,
}
impl<W> Shell<W>
where
	W: Write,
{
	pub fn new(service: Arc<VaultService>, user: Option<Uuid>, out: W) -> Self {
		Self { browser: Browser::new(service, user), reading: None, out }
	}

	pub fn browser(&self) -> &Browser {
		&self.browser
	}

	pub fn into_output(self) -> W {
		self.out
	}

	pub async fn run<R>(&mut self, input: R, interactive: bool) -> std::io::Result<()>
	where
		R: AsyncBufRead + Unpin,
	{
		self.browser.refresh().await;
		self.print_visible()?;

		let mut lines = input.lines();

		loop {
			if interactive {
				write!(self.out, "{PROMPT}")?;
				self.out.flush()?;
			}

			let Some(line) = lines.next_line().await? else {
				break;
			};

			if self.handle_line(&line).await? == Flow::Quit {
				break;
			}
		}

		Ok(())
	}

	pub async fn handle_line(&mut self, line: &str) -> std::io::Result<Flow> {
		match command::parse(line) {
			Ok(None) => Ok(Flow::Continue),
			Ok(Some(command)) => self.execute(command).await,
			Err(message) => {
				writeln!(self.out, "error: {message}")?;

				Ok(Flow::Continue)
			},
		}
	}

	pub async fn execute(&mut self, command: Command) -> std::io::Result<Flow> {
		match command {
			Command::List => {
				self.browser.reload().await;
				self.print_visible()?;
			},
			Command::Next => self.navigate(Nav::Next).await?,
			Command::Prev => self.navigate(Nav::Prev).await?,
			Command::Page(page) => self.navigate(Nav::Page(page)).await?,
			Command::Search { query, tags } => {
				self.browser.search_for(&query, tags).await;
				self.print_visible()?;
			},
			Command::Clear => {
				self.browser.clear_search();
				self.print_visible()?;
			},
			Command::Add(fields) => self.add(fields).await?,
			Command::Edit(target, fields) => self.edit(target, fields).await?,
			Command::Delete { target, confirmed } => self.delete(target, confirmed).await?,
			Command::Show(target) => self.show(target).await?,
			Command::Read(step) => self.read(step).await?,
			Command::Insight => self.insight().await?,
			Command::Tags(fragment) => self.tags(fragment).await?,
			Command::Color { tag, background, border, text } => {
				let color = vault_domain::tag_colors::TagColor {
					background_color: background,
					border_color: border,
					text_color: text,
				};

				match self.service().set_tag_color(self.browser.user(), &tag, color).await {
					Ok(view) => writeln!(self.out, "{}", render::tag_line(&view))?,
					Err(err) => self.report(&err)?,
				}
			},
			Command::Dashboard => match self.service().dashboard(self.browser.user()).await {
				Ok(dashboard) =>
					for line in render::dashboard(&dashboard, OffsetDateTime::now_utc()) {
						writeln!(self.out, "{line}")?;
					},
				Err(err) => self.report(&err)?,
			},
			Command::Help => writeln!(self.out, "{HELP}")?,
			Command::Quit => return Ok(Flow::Quit),
		}

		self.flush_notices()?;

		Ok(Flow::Continue)
	}

	fn service(&self) -> Arc<VaultService> {
		self.browser.service().clone()
	}

	async fn navigate(&mut self, nav: Nav) -> std::io::Result<()> {
		if self.browser.search().is_active() {
			return writeln!(self.out, "Search results are not paginated. Type `clear` first.");
		}

		let list = self.browser.list_mut();
		let moved = match nav {
			Nav::Next => list.next_page().await,
			Nav::Prev => list.prev_page().await,
			Nav::Page(page) => list.go_to_page(page).await,
		};

		if !moved {
			return writeln!(self.out, "No such page.");
		}

		self.print_visible()
	}

	async fn add(&mut self, fields: EntryFields) -> std::io::Result<()> {
		let req = CreateEntryRequest {
			title: fields.title.unwrap_or_default(),
			content: fields.content.unwrap_or_default(),
			tags: fields.tags,
			kind: fields.kind,
			url: fields.url,
		};

		if let Some(entry) = self.browser.create_entry(req).await {
			writeln!(self.out, "Added {} ({}).", entry.display_title, entry.id)?;
		}

		Ok(())
	}

	async fn edit(&mut self, target: EntryRef, fields: EntryFields) -> std::io::Result<()> {
		let Some(entry_id) = self.resolve(target)? else {
			return Ok(());
		};
		let req = UpdateEntryRequest {
			title: fields.title,
			content: fields.content,
			tags: (!fields.tags.is_empty()).then_some(fields.tags),
			kind: fields.kind,
			url: fields.url,
		};

		if let Some(entry) = self.browser.update_entry(entry_id, req).await {
			writeln!(self.out, "Updated {}.", entry.display_title)?;
		}

		Ok(())
	}

	async fn delete(&mut self, target: EntryRef, confirmed: bool) -> std::io::Result<()> {
		let Some(entry_id) = self.resolve(target)? else {
			return Ok(());
		};

		if !confirmed {
			return writeln!(
				self.out,
				"This permanently deletes the entry. Repeat with --yes to confirm."
			);
		}

		self.browser.delete_entry(entry_id, true).await;

		Ok(())
	}

	async fn show(&mut self, target: EntryRef) -> std::io::Result<()> {
		let Some(entry_id) = self.resolve(target)? else {
			return Ok(());
		};
		let service = self.service();
		let user = self.browser.user();
		let entry = match service.get_entry(user, entry_id).await {
			Ok(entry) => entry,
			Err(err) => return self.report(&err),
		};

		self.print_entry(&entry).await
	}

	async fn read(&mut self, step: ReadStep) -> std::io::Result<()> {
		match step {
			ReadStep::Start => match self.service().all_entries(self.browser.user()).await {
				Ok(entries) => {
					let cursor = ReadingCursor::new(entries.len(), 0);

					self.reading = Some(Reading { entries, cursor });
				},
				Err(err) => return self.report(&err),
			},
			ReadStep::Next | ReadStep::Prev => {
				let Some(reading) = self.reading.as_mut() else {
					return writeln!(self.out, "Type `read` to start reading mode.");
				};
				let moved = if step == ReadStep::Next {
					reading.cursor.next()
				} else {
					reading.cursor.prev()
				};

				if !moved {
					return writeln!(self.out, "No more entries in that direction.");
				}
			},
		}

		let Some(reading) = self.reading.as_ref() else {
			return Ok(());
		};

		writeln!(self.out, "{}", reading.cursor.label())?;

		let Some(entry) = reading.entries.get(reading.cursor.index()).cloned() else {
			return Ok(());
		};

		self.print_entry(&entry).await
	}

	async fn insight(&mut self) -> std::io::Result<()> {
		let view = browse::load_analysis(&self.service(), self.browser.user()).await;

		writeln!(self.out, "{}", view.message())?;

		if let AnalysisView::Ready { created_at, .. } = view {
			writeln!(
				self.out,
				"(generated {})",
				vault_domain::relative_time::time_ago(created_at, OffsetDateTime::now_utc())
			)?;
		}

		Ok(())
	}

	async fn tags(&mut self, fragment: Option<String>) -> std::io::Result<()> {
		let catalogue = match self.service().tag_catalogue(self.browser.user()).await {
			Ok(catalogue) => catalogue,
			Err(err) => return self.report(&err),
		};

		match fragment {
			Some(fragment) => {
				let selected = &self.browser.search().tags;

				for name in catalogue.suggestions(selected, &fragment) {
					writeln!(self.out, "{name}")?;
				}
			},
			None if catalogue.tags.is_empty() => writeln!(self.out, "No tags yet.")?,
			None =>
				for tag in &catalogue.tags {
					writeln!(self.out, "{}", render::tag_line(tag))?;
				},
		}

		Ok(())
	}

	async fn print_entry(&mut self, entry: &Entry) -> std::io::Result<()> {
		let colors = match self.service().tag_colors(self.browser.user()).await {
			Ok(colors) => colors,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to load tag colors; using the palette.");

				Default::default()
			},
		};

		for line in render::entry_detail(entry, &colors, OffsetDateTime::now_utc()) {
			writeln!(self.out, "{line}")?;
		}

		Ok(())
	}

	fn resolve(&mut self, target: EntryRef) -> std::io::Result<Option<Uuid>> {
		match target {
			EntryRef::Id(entry_id) => Ok(Some(entry_id)),
			EntryRef::Row(row) => match self.browser.visible().get(row - 1) {
				Some(entry) => Ok(Some(entry.id)),
				None => {
					writeln!(self.out, "No row {row} in the current listing.")?;

					Ok(None)
				},
			},
		}
	}

	fn print_visible(&mut self) -> std::io::Result<()> {
		let now = OffsetDateTime::now_utc();

		if let ListState::Failed(message) = self.browser.list().state()
			&& !self.browser.search().is_active()
		{
			writeln!(self.out, "Could not load entries: {message}")?;

			return self.flush_notices();
		}

		for (index, entry) in self.browser.visible().iter().enumerate() {
			writeln!(self.out, "{}", render::entry_row(index + 1, entry, now))?;
		}

		if self.browser.search().is_active() {
			writeln!(
				self.out,
				"{} search result(s). Type `clear` to return to the list.",
				self.browser.visible().len()
			)?;
		} else {
			writeln!(self.out, "{}", render::page_footer(self.browser.list().pagination()))?;
		}

		self.flush_notices()
	}

	fn report(&mut self, err: &Error) -> std::io::Result<()> {
		tracing::error!(error = %err, "Request failed.");

		let notice = Notice::from_error("An Error Occurred", "The request failed.", err);

		writeln!(self.out, "{}", render::notice(&notice))
	}

	fn flush_notices(&mut self) -> std::io::Result<()> {
		for notice in self.browser.take_notices() {
			writeln!(self.out, "{}", render::notice(&notice))?;
		}

		Ok(())
	}
}

enum Nav {
	Next,
	Prev,
	Page(u64),
}
