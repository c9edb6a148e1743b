use std::path::{Path, PathBuf};

pub const LIBRARY_METADATA_FILE: &str = "metadata.json";
pub const TAGS_INDEX_FILE: &str = "tags.json";
pub const MTIME_INDEX_FILE: &str = "mtime.json";
pub const IMAGES_DIR: &str = "images";
pub const ITEM_DIR_SUFFIX: &str = ".info";

/// Path derivation for the host's on-disk library layout. Pure; nothing here
/// touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
	root: PathBuf,
}

impl LibraryPaths {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn metadata_file(&self) -> PathBuf {
		self.root.join(LIBRARY_METADATA_FILE)
	}

	pub fn tags_file(&self) -> PathBuf {
		self.root.join(TAGS_INDEX_FILE)
	}

	pub fn mtime_file(&self) -> PathBuf {
		self.root.join(MTIME_INDEX_FILE)
	}

	pub fn images_dir(&self) -> PathBuf {
		self.root.join(IMAGES_DIR)
	}

	pub fn item_dir(&self, id: &str) -> PathBuf {
		self.images_dir().join(format!("{id}{ITEM_DIR_SUFFIX}"))
	}

	pub fn item_metadata_file(&self, id: &str) -> PathBuf {
		self.item_dir(id).join(LIBRARY_METADATA_FILE)
	}

	pub fn item_url_file(&self, id: &str) -> PathBuf {
		self.item_dir(id).join(format!("{id}.url"))
	}
}
