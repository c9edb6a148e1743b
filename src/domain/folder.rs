use serde::{Deserialize, Serialize};

/// Immutable projection of a host folder record.
///
/// `children` holds the ids of direct child folders only; resolving them
/// back to records (and recursing) is the caller's business. Folders nest,
/// but never carry an item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSnapshot {
	pub id: String,
	pub name: String,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_color: Option<String>,
	pub created_at: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
	#[serde(default)]
	pub children: Vec<String>,
}
