#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingCursor {
	index: usize,
	len: usize,
}
impl ReadingCursor {
	pub fn new(len: usize, initial_index: usize) -> Self {
		Self { index: initial_index.min(len.saturating_sub(1)), len }
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn is_first(&self) -> bool {
		self.index == 0
	}

	pub fn is_last(&self) -> bool {
		self.index + 1 >= self.len
	}

	pub fn next(&mut self) -> bool {
		if self.is_last() {
			return false;
		}

		self.index += 1;

		true
	}

	pub fn prev(&mut self) -> bool {
		if self.is_first() {
			return false;
		}

		self.index -= 1;

		true
	}

	pub fn label(&self) -> String {
		if self.is_empty() {
			return "No entries".to_string();
		}

		format!("Entry {} of {}", self.index + 1, self.len)
	}
}
