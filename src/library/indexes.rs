//! The two derived indexes kept next to the library document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `mtime.json`: flat item-id → last-modified epoch-ms map. The host may
/// keep an aggregate entry under [`MTIME_ALL_KEY`]; it is carried like any
/// other key.
pub type MtimeIndex = BTreeMap<String, i64>;

pub const MTIME_ALL_KEY: &str = "all";

/// `tags.json`. `history_tags` is an ordered list with set semantics;
/// `starred_tags` is user-curated and only ever carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsIndex {
	#[serde(default)]
	pub history_tags: Vec<String>,
	#[serde(default)]
	pub starred_tags: Vec<String>,
}

impl TagsIndex {
	/// Insertion-unique append; reports whether the tag was new.
	pub fn record_history(&mut self, tag: &str) -> bool {
		if self.history_tags.iter().any(|t| t == tag) {
			return false;
		}

		self.history_tags.push(tag.to_owned());
		true
	}
}
