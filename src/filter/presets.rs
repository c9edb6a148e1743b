//! Single-purpose filter constructors and combinators. Everything here
//! composes to plain builder output; there is no separate evaluation path.

use chrono::{DateTime, TimeZone};

use super::{FilterBuilder, ItemFilter, Match, Property};

/// Accepted by [`by_import_date_range`]: raw epoch milliseconds or a
/// timezone-aware date, both normalized to epoch milliseconds.
pub trait IntoEpochMs {
	fn into_epoch_ms(self) -> i64;
}

impl IntoEpochMs for i64 {
	fn into_epoch_ms(self) -> i64 {
		self
	}
}

impl<Tz: TimeZone> IntoEpochMs for DateTime<Tz> {
	fn into_epoch_ms(self) -> i64 {
		self.timestamp_millis()
	}
}

pub fn by_tags<I, S>(tags: I) -> ItemFilter
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	FilterBuilder::new()
		.where_(Property::Tags)
		.includes_any(tags)
		.build()
}

pub fn by_folders<I, S>(folders: I) -> ItemFilter
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	FilterBuilder::new()
		.where_(Property::Folders)
		.includes_any(folders)
		.build()
}

pub fn by_name_regex(pattern: impl Into<String>) -> ItemFilter {
	FilterBuilder::new()
		.where_(Property::Name)
		.matches(pattern.into())
		.build()
}

/// A leading `.` is stripped, so `".png"` and `"png"` build the same filter.
pub fn by_extension(ext: &str) -> ItemFilter {
	let ext = ext.strip_prefix('.').unwrap_or(ext);
	FilterBuilder::new()
		.where_(Property::Ext)
		.is(ext)
		.build()
}

pub fn by_min_rating(stars: u8) -> ItemFilter {
	FilterBuilder::new()
		.where_(Property::Star)
		.gte(i64::from(stars))
		.build()
}

pub fn untagged() -> ItemFilter {
	FilterBuilder::new().where_(Property::Tags).is_empty().build()
}

pub fn unfiled() -> ItemFilter {
	FilterBuilder::new()
		.where_(Property::Folders)
		.is_empty()
		.build()
}

pub fn by_import_date_range(from: impl IntoEpochMs, to: impl IntoEpochMs) -> ItemFilter {
	FilterBuilder::new()
		.where_(Property::ImportedAt)
		.between(from.into_epoch_ms(), to.into_epoch_ms())
		.build()
}

/// Combine filters by flattening their condition sequences under ALL.
pub fn and_combine(filters: impl IntoIterator<Item = ItemFilter>) -> ItemFilter {
	combine(filters, Match::All)
}

/// Combine filters by flattening their condition sequences under ANY.
pub fn or_combine(filters: impl IntoIterator<Item = ItemFilter>) -> ItemFilter {
	combine(filters, Match::Any)
}

fn combine(filters: impl IntoIterator<Item = ItemFilter>, match_mode: Match) -> ItemFilter {
	ItemFilter {
		conditions: filters
			.into_iter()
			.flat_map(|filter| filter.conditions)
			.collect(),
		match_mode,
	}
}
