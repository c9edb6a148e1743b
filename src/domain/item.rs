use serde::{Deserialize, Serialize};

/// Immutable projection of a host item record.
///
/// Numeric absence of `star` is preserved as `None`; `tags` and `folders`
/// are always present, possibly empty. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
	pub id: String,
	pub name: String,
	pub ext: String,
	pub url: String,
	pub annotation: String,
	pub width: i64,
	pub height: i64,
	pub size: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub star: Option<u8>,
	pub imported_at: i64,
	pub modified_at: i64,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub folders: Vec<String>,
	#[serde(default)]
	pub is_deleted: bool,
}
