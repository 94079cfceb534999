pub const MAX_VISIBLE_PAGES: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
	page_size: u32,
	current_page: u64,
	total_count: u64,
}
impl Pagination {
	pub fn new(page_size: u32) -> Self {
		Self { page_size: page_size.max(1), current_page: 1, total_count: 0 }
	}

	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	pub fn current_page(&self) -> u64 {
		self.current_page
	}

	pub fn total_count(&self) -> u64 {
		self.total_count
	}

	pub fn total_pages(&self) -> u64 {
		self.total_count.div_ceil(u64::from(self.page_size))
	}

	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages()
	}

	pub fn has_prev(&self) -> bool {
		self.current_page > 1
	}

	pub fn go_to_page(&mut self, page: u64) -> bool {
		if page < 1 || page > self.total_pages() {
			return false;
		}

		self.current_page = page;

		true
	}

	pub fn next_page(&mut self) -> bool {
		self.go_to_page(self.current_page.saturating_add(1))
	}

	pub fn prev_page(&mut self) -> bool {
		self.go_to_page(self.current_page.saturating_sub(1))
	}

	/// Records a freshly fetched count.
	///
	/// When the count shrinks below the current page (for example after a delete on the last
	/// page), the current page is clamped to the new last page. Returns whether clamping happened.
	pub fn set_total_count(&mut self, total_count: u64) -> bool {
		self.total_count = total_count;

		let last = self.total_pages().max(1);

		if self.current_page > last {
			self.current_page = last;

			return true;
		}

		false
	}

	pub fn offset(&self) -> u64 {
		(self.current_page - 1).saturating_mul(u64::from(self.page_size))
	}

	pub fn limit(&self) -> u32 {
		self.page_size
	}

	pub fn page_numbers(&self) -> Vec<u64> {
		let total_pages = self.total_pages();

		if total_pages <= MAX_VISIBLE_PAGES {
			return (1..=total_pages).collect();
		}

		let start = self.current_page.saturating_sub(2).max(1);
		let end = total_pages.min(start + MAX_VISIBLE_PAGES - 1);

		(start..=end).collect()
	}

	pub fn showing(&self) -> Option<(u64, u64)> {
		let from = self.offset() + 1;
		let to = self.current_page.saturating_mul(u64::from(self.page_size)).min(self.total_count);

		if self.total_count == 0 || from > to {
			return None;
		}

		Some((from, to))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn with_total(page_size: u32, total: u64) -> Pagination {
		let mut pagination = Pagination::new(page_size);

		pagination.set_total_count(total);

		pagination
	}

	#[test]
	fn total_pages_is_ceiling() {
		for page_size in 1..=30_u32 {
			for total in 0..=200_u64 {
				let pagination = with_total(page_size, total);
				let expected = total.div_ceil(u64::from(page_size));

				assert_eq!(pagination.total_pages(), expected, "size={page_size} total={total}");
			}
		}
	}

	#[test]
	fn go_to_page_outside_bounds_is_noop() {
		let mut pagination = with_total(24, 50);

		assert_eq!(pagination.total_pages(), 3);
		assert!(!pagination.go_to_page(0));
		assert!(!pagination.go_to_page(4));
		assert_eq!(pagination.current_page(), 1);
		assert!(pagination.go_to_page(3));
		assert_eq!(pagination.current_page(), 3);
		assert!(!pagination.next_page());
		assert_eq!(pagination.current_page(), 3);
	}

	#[test]
	fn prev_on_first_page_is_noop() {
		let mut pagination = with_total(24, 10);

		assert!(!pagination.prev_page());
		assert_eq!(pagination.current_page(), 1);
		assert!(!pagination.has_prev());
		assert!(!pagination.has_next());
	}

	#[test]
	fn empty_store_has_no_pages() {
		let mut pagination = with_total(24, 0);

		assert_eq!(pagination.total_pages(), 0);
		assert!(!pagination.go_to_page(1));
		assert_eq!(pagination.current_page(), 1);
		assert_eq!(pagination.showing(), None);
		assert!(pagination.page_numbers().is_empty());
	}

	#[test]
	fn offset_follows_page() {
		let mut pagination = with_total(24, 100);

		assert_eq!(pagination.offset(), 0);

		pagination.go_to_page(3);

		assert_eq!(pagination.offset(), 48);
		assert_eq!(pagination.limit(), 24);
		assert_eq!(pagination.showing(), Some((49, 72)));

		pagination.go_to_page(5);

		assert_eq!(pagination.showing(), Some((97, 100)));
	}

	#[test]
	fn shrinking_count_clamps_current_page() {
		let mut pagination = with_total(10, 21);

		assert!(pagination.go_to_page(3));
		assert!(pagination.set_total_count(20));
		assert_eq!(pagination.current_page(), 2);
		assert!(!pagination.set_total_count(15));
		assert_eq!(pagination.current_page(), 2);
		assert!(pagination.set_total_count(0));
		assert_eq!(pagination.current_page(), 1);
	}

	#[test]
	fn page_window_slides_with_current_page() {
		let mut pagination = with_total(1, 10);

		assert_eq!(pagination.page_numbers(), vec![1, 2, 3, 4, 5]);

		pagination.go_to_page(6);

		assert_eq!(pagination.page_numbers(), vec![4, 5, 6, 7, 8]);

		pagination.go_to_page(10);

		assert_eq!(pagination.page_numbers(), vec![8, 9, 10]);

		let few = with_total(1, 4);

		assert_eq!(few.page_numbers(), vec![1, 2, 3, 4]);
	}

	#[test]
	fn zero_page_size_is_treated_as_one() {
		let pagination = with_total(0, 3);

		assert_eq!(pagination.page_size(), 1);
		assert_eq!(pagination.total_pages(), 3);
	}
}
