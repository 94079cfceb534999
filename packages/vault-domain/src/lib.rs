pub mod direction;
pub mod entry;
pub mod pagination;
pub mod reading;
pub mod relative_time;
pub mod tag_colors;
pub mod tags;
