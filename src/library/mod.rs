//! Bare library I/O: a direct, file-backed view of the host's on-disk
//! library layout.
//!
//! Every mutation of the shared library document follows a clone-mutate-
//! replace discipline: read the current document, deep-clone it, apply the
//! change to the clone, write the clone back. That narrows (but does not
//! eliminate) the window in which a concurrent host write can be lost;
//! cross-process locking is explicitly not attempted.

pub mod document;
pub mod forest;
mod indexes;
mod items;
mod paths;

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::util::{
	error::FileIOError,
	json::{self, JsonFileError},
};

pub use document::{FolderNode, LibraryDocument, QuickAccessEntry, SmartFolderNode, TagGroup};
pub use forest::ForestNode;
pub use indexes::{MtimeIndex, TagsIndex, MTIME_ALL_KEY};
pub use items::{ItemMetadata, ItemStore, WriteOptions};
pub use paths::{
	LibraryPaths, IMAGES_DIR, ITEM_DIR_SUFFIX, LIBRARY_METADATA_FILE, MTIME_INDEX_FILE,
	TAGS_INDEX_FILE,
};

#[derive(Debug, Error)]
pub enum LibraryIoError {
	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("{entity} not found: {id}")]
	NotFound { entity: &'static str, id: String },
	#[error("parent {entity} not found: {id}")]
	ParentNotFound { entity: &'static str, id: String },
}

impl From<JsonFileError> for LibraryIoError {
	fn from(e: JsonFileError) -> Self {
		match e {
			JsonFileError::Io(e) => Self::FileIO(e),
			JsonFileError::Serde(e) => Self::SerdeJson(e),
		}
	}
}

/// One library root on disk.
#[derive(Debug, Clone)]
pub struct BareLibrary {
	paths: LibraryPaths,
}

impl BareLibrary {
	pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
		Self {
			paths: LibraryPaths::new(root),
		}
	}

	pub fn paths(&self) -> &LibraryPaths {
		&self.paths
	}

	/// Parse the library document. A missing or malformed document is the
	/// caller's problem; nothing is fabricated.
	pub async fn read_metadata(&self) -> Result<LibraryDocument, LibraryIoError> {
		Ok(json::read_file(self.paths.metadata_file()).await?)
	}

	/// Clone-mutate-replace over the library document. The document handed
	/// to `mutate` is a deep clone of the read result; the read result is
	/// never written and never structurally shared with what is.
	pub async fn update_metadata<F>(&self, mutate: F) -> Result<LibraryDocument, LibraryIoError>
	where
		F: FnOnce(&mut LibraryDocument) -> Result<(), LibraryIoError>,
	{
		let current = self.read_metadata().await?;
		let mut next = current.clone();
		mutate(&mut next)?;

		json::write_file_pretty(self.paths.metadata_file(), &next).await?;

		Ok(next)
	}

	pub fn folders(&self) -> ForestStore<'_, FoldersAccess> {
		ForestStore {
			library: self,
			_access: PhantomData,
		}
	}

	pub fn smart_folders(&self) -> ForestStore<'_, SmartFoldersAccess> {
		ForestStore {
			library: self,
			_access: PhantomData,
		}
	}

	pub fn tag_groups(&self) -> TagGroupStore<'_> {
		TagGroupStore { library: self }
	}

	pub fn quick_access(&self) -> QuickAccessStore<'_> {
		QuickAccessStore { library: self }
	}

	pub fn items(&self) -> ItemStore<'_> {
		ItemStore { library: self }
	}

	/// Derived-index reads surface their errors; whether a missing index
	/// means "empty" is the caller's call.
	pub async fn read_mtime_index(&self) -> Result<MtimeIndex, LibraryIoError> {
		Ok(json::read_file(self.paths.mtime_file()).await?)
	}

	pub async fn write_mtime_index(&self, index: &MtimeIndex) -> Result<(), LibraryIoError> {
		Ok(json::write_file_pretty(self.paths.mtime_file(), index).await?)
	}

	pub async fn read_tags_index(&self) -> Result<TagsIndex, LibraryIoError> {
		Ok(json::read_file(self.paths.tags_file()).await?)
	}

	pub async fn write_tags_index(&self, index: &TagsIndex) -> Result<(), LibraryIoError> {
		Ok(json::write_file_pretty(self.paths.tags_file(), index).await?)
	}
}

/// Which forest of the library document a [`ForestStore`] operates on.
pub trait ForestAccess {
	type Node: ForestNode + Clone + Serialize + DeserializeOwned + Send;
	const ENTITY: &'static str;

	fn forest(doc: &LibraryDocument) -> &Vec<Self::Node>;
	fn forest_mut(doc: &mut LibraryDocument) -> &mut Vec<Self::Node>;
}

pub struct FoldersAccess;

impl ForestAccess for FoldersAccess {
	type Node = FolderNode;
	const ENTITY: &'static str = "folder";

	fn forest(doc: &LibraryDocument) -> &Vec<FolderNode> {
		&doc.folders
	}

	fn forest_mut(doc: &mut LibraryDocument) -> &mut Vec<FolderNode> {
		&mut doc.folders
	}
}

pub struct SmartFoldersAccess;

impl ForestAccess for SmartFoldersAccess {
	type Node = SmartFolderNode;
	const ENTITY: &'static str = "smart folder";

	fn forest(doc: &LibraryDocument) -> &Vec<SmartFolderNode> {
		&doc.smart_folders
	}

	fn forest_mut(doc: &mut LibraryDocument) -> &mut Vec<SmartFolderNode> {
		&mut doc.smart_folders
	}
}

/// The forest mutation protocol, identical for folders and smart folders.
pub struct ForestStore<'a, A: ForestAccess> {
	library: &'a BareLibrary,
	_access: PhantomData<A>,
}

impl<A: ForestAccess> ForestStore<'_, A> {
	pub async fn list_tree(&self) -> Result<Vec<A::Node>, LibraryIoError> {
		Ok(A::forest(&self.library.read_metadata().await?).clone())
	}

	/// Depth-first search through nested children; `None` when absent.
	pub async fn get_by_id(&self, id: &str) -> Result<Option<A::Node>, LibraryIoError> {
		let doc = self.library.read_metadata().await?;
		Ok(forest::find(A::forest(&doc), id).cloned())
	}

	/// Append `node` at the root, or under `parent_id` when given.
	pub async fn add(
		&self,
		node: A::Node,
		parent_id: Option<&str>,
	) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				let forest = A::forest_mut(doc);
				match parent_id {
					None => forest.push(node),
					Some(parent_id) => {
						let parent = forest::find_mut(forest, parent_id).ok_or_else(|| {
							LibraryIoError::ParentNotFound {
								entity: A::ENTITY,
								id: parent_id.to_owned(),
							}
						})?;
						parent.children_mut().push(node);
					}
				}
				Ok(())
			})
			.await
	}

	/// Shallow-merge `patch` into the node with `id`; returns the updated
	/// node.
	pub async fn update(
		&self,
		id: &str,
		patch: Map<String, Value>,
	) -> Result<A::Node, LibraryIoError> {
		let mut updated = None;

		self.library
			.update_metadata(|doc| {
				let node =
					forest::find_mut(A::forest_mut(doc), id).ok_or_else(|| LibraryIoError::NotFound {
						entity: A::ENTITY,
						id: id.to_owned(),
					})?;

				let merged = forest::merge_patch(&*node, &patch)?;
				*node = merged;
				updated = Some(node.clone());
				Ok(())
			})
			.await?;

		updated.ok_or_else(|| LibraryIoError::NotFound {
			entity: A::ENTITY,
			id: id.to_owned(),
		})
	}

	/// Rebuild the forest without `id`, at every level.
	pub async fn remove(&self, id: &str) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				if forest::remove(A::forest_mut(doc), id) {
					Ok(())
				} else {
					Err(LibraryIoError::NotFound {
						entity: A::ENTITY,
						id: id.to_owned(),
					})
				}
			})
			.await
	}
}

/// Flat list edits over the tag-group list.
pub struct TagGroupStore<'a> {
	library: &'a BareLibrary,
}

impl TagGroupStore<'_> {
	pub async fn list(&self) -> Result<Vec<TagGroup>, LibraryIoError> {
		Ok(self.library.read_metadata().await?.tags_groups)
	}

	pub async fn add(&self, group: TagGroup) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				doc.tags_groups.push(group);
				Ok(())
			})
			.await
	}

	pub async fn update(
		&self,
		id: &str,
		patch: Map<String, Value>,
	) -> Result<TagGroup, LibraryIoError> {
		let mut updated = None;

		self.library
			.update_metadata(|doc| {
				let group = doc
					.tags_groups
					.iter_mut()
					.find(|group| group.id == id)
					.ok_or_else(|| LibraryIoError::NotFound {
						entity: "tag group",
						id: id.to_owned(),
					})?;

				let merged = forest::merge_patch(&*group, &patch)?;
				*group = merged;
				updated = Some(group.clone());
				Ok(())
			})
			.await?;

		updated.ok_or_else(|| LibraryIoError::NotFound {
			entity: "tag group",
			id: id.to_owned(),
		})
	}

	pub async fn remove(&self, id: &str) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				let before = doc.tags_groups.len();
				doc.tags_groups.retain(|group| group.id != id);

				if doc.tags_groups.len() == before {
					return Err(LibraryIoError::NotFound {
						entity: "tag group",
						id: id.to_owned(),
					});
				}
				Ok(())
			})
			.await
	}
}

/// Flat list edits over the quick-access list, keyed by `(type, id)`.
pub struct QuickAccessStore<'a> {
	library: &'a BareLibrary,
}

impl QuickAccessStore<'_> {
	pub async fn list(&self) -> Result<Vec<QuickAccessEntry>, LibraryIoError> {
		Ok(self.library.read_metadata().await?.quick_access)
	}

	pub async fn add(&self, entry: QuickAccessEntry) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				doc.quick_access.push(entry);
				Ok(())
			})
			.await
	}

	pub async fn remove(&self, kind: &str, id: &str) -> Result<LibraryDocument, LibraryIoError> {
		self.library
			.update_metadata(|doc| {
				let before = doc.quick_access.len();
				doc.quick_access
					.retain(|entry| !(entry.kind == kind && entry.id == id));

				if doc.quick_access.len() == before {
					return Err(LibraryIoError::NotFound {
						entity: "quick access entry",
						id: format!("{kind}:{id}"),
					});
				}
				Ok(())
			})
			.await
	}
}
