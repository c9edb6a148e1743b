//! Recursive operations over nested node forests. Traversal is strictly
//! parent-to-child through `children`; parent ids on the nodes are never
//! followed.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A node in an id-keyed forest.
pub trait ForestNode: Sized {
	fn node_id(&self) -> &str;
	fn children(&self) -> &[Self];
	fn children_mut(&mut self) -> &mut Vec<Self>;
}

/// Depth-first search; first match wins.
pub fn find<'a, N: ForestNode>(nodes: &'a [N], id: &str) -> Option<&'a N> {
	for node in nodes {
		if node.node_id() == id {
			return Some(node);
		}
		if let Some(found) = find(node.children(), id) {
			return Some(found);
		}
	}

	None
}

pub fn find_mut<'a, N: ForestNode>(nodes: &'a mut [N], id: &str) -> Option<&'a mut N> {
	for node in nodes {
		if node.node_id() == id {
			return Some(node);
		}
		if let Some(found) = find_mut(node.children_mut(), id) {
			return Some(found);
		}
	}

	None
}

/// Rebuild the forest without `id`, filtering at every level and recursing
/// into children. Reports whether anything was removed.
pub fn remove<N: ForestNode>(nodes: &mut Vec<N>, id: &str) -> bool {
	let before = nodes.len();
	nodes.retain(|node| node.node_id() != id);
	let mut removed = nodes.len() != before;

	for node in nodes {
		removed |= remove(node.children_mut(), id);
	}

	removed
}

/// Shallow-merge `patch` into a node: top-level keys overwrite, nested
/// values are replaced wholesale.
pub fn merge_patch<N>(node: &N, patch: &Map<String, Value>) -> Result<N, serde_json::Error>
where
	N: Serialize + DeserializeOwned,
{
	let mut value = serde_json::to_value(node)?;

	if let Value::Object(fields) = &mut value {
		for (key, patched) in patch {
			fields.insert(key.clone(), patched.clone());
		}
	}

	serde_json::from_value(value)
}
