//! The library document and its node types, exactly as the host lays them
//! out in `metadata.json`. Every type flattens unrecognized fields into an
//! `extra` map so clone-mutate-replace round-trips host-written fields this
//! crate does not model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::forest::ForestNode;

/// The single JSON object at `{library-root}/metadata.json`: folder forest,
/// smart-folder forest, quick-access list, tag groups, and versioning
/// fields. Forest node ids are unique globally within their forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocument {
	#[serde(default)]
	pub folders: Vec<FolderNode>,
	#[serde(default)]
	pub smart_folders: Vec<SmartFolderNode>,
	#[serde(default)]
	pub quick_access: Vec<QuickAccessEntry>,
	#[serde(default)]
	pub tags_groups: Vec<TagGroup>,
	#[serde(default)]
	pub modification_time: i64,
	#[serde(default)]
	pub application_version: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// One node of the folder forest. Nodes carry both a parent id (for external
/// queries) and nested children (for traversal); every recursive operation
/// descends `children` and never follows `parent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
	#[serde(default)]
	pub children: Vec<FolderNode>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl ForestNode for FolderNode {
	fn node_id(&self) -> &str {
		&self.id
	}

	fn children(&self) -> &[Self] {
		&self.children
	}

	fn children_mut(&mut self) -> &mut Vec<Self> {
		&mut self.children
	}
}

/// One node of the smart-folder forest. The host-defined `conditions` value
/// is carried verbatim; this crate never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartFolderNode {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default, skip_serializing_if = "Value::is_null")]
	pub conditions: Value,
	#[serde(default)]
	pub children: Vec<SmartFolderNode>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl ForestNode for SmartFolderNode {
	fn node_id(&self) -> &str {
		&self.id
	}

	fn children(&self) -> &[Self] {
		&self.children
	}

	fn children_mut(&mut self) -> &mut Vec<Self> {
		&mut self.children
	}
}

/// Tag groups are a flat list, never nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagGroup {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Quick-access entries are keyed by the `(type, id)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAccessEntry {
	#[serde(rename = "type")]
	pub kind: String,
	pub id: String,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn unknown_fields_survive_a_round_trip() {
		let raw = json!({
			"folders": [{
				"id": "f1",
				"name": "Art",
				"children": [],
				"password": "",
				"orderBy": "MANUAL"
			}],
			"smartFolders": [],
			"quickAccess": [{"type": "folder", "id": "f1"}],
			"tagsGroups": [],
			"modificationTime": 1700000000000i64,
			"applicationVersion": "4.0.0",
			"pinnedTime": 12345
		});

		let doc: LibraryDocument = serde_json::from_value(raw.clone()).unwrap();
		assert_eq!(doc.extra.get("pinnedTime"), Some(&json!(12345)));
		assert_eq!(
			doc.folders[0].extra.get("orderBy"),
			Some(&json!("MANUAL"))
		);

		let back = serde_json::to_value(&doc).unwrap();
		assert_eq!(back.get("pinnedTime"), Some(&json!(12345)));
		assert_eq!(
			back.pointer("/folders/0/password"),
			Some(&json!(""))
		);
	}
}
