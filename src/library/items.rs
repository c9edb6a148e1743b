//! Per-item metadata I/O: `images/{id}.info/metadata.json`, the `.url`
//! companion for link items, and maintenance of the derived indexes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;

use crate::util::{error::FileIOError, json, now_ms};

use super::{BareLibrary, LibraryIoError, ITEM_DIR_SUFFIX};

const URL_EXT: &str = "url";
const URL_COMPANION_SUFFIX: &str = ".url";

/// One item's on-disk metadata record. The two modification-time pairs
/// (`btime`/`mtime` and `modificationTime`/`lastModified`) coexist on disk
/// without a unifying contract; both are carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub size: i64,
	#[serde(default)]
	pub btime: i64,
	#[serde(default)]
	pub mtime: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub modification_time: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_modified: Option<i64>,
	#[serde(default)]
	pub ext: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub folders: Vec<String>,
	#[serde(default)]
	pub is_deleted: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default)]
	pub annotation: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
	/// Write the `.url` companion for `ext == "url"` items.
	pub write_url_companion: bool,
	/// Maintain `mtime.json` and `tags.json` after the metadata write.
	pub update_indexes: bool,
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self {
			write_url_companion: true,
			update_indexes: true,
		}
	}
}

/// Item-level operations on one library.
pub struct ItemStore<'a> {
	pub(super) library: &'a BareLibrary,
}

impl ItemStore<'_> {
	/// Read one item's metadata. For link items whose `url` field is absent
	/// or empty, the `.url` companion file is parsed and the field populated
	/// before returning; nothing is written back.
	pub async fn read(&self, id: &str) -> Result<ItemMetadata, LibraryIoError> {
		let path = self.library.paths().item_metadata_file(id);
		let mut metadata: ItemMetadata = json::read_file(&path).await?;

		if metadata.ext == URL_EXT && metadata.url.as_deref().map_or(true, str::is_empty) {
			if let Some(companion) = self.find_companion(id).await {
				let contents = fs::read_to_string(&companion)
					.await
					.map_err(|e| FileIOError::from((&companion, e)))?;
				metadata.url = parse_internet_shortcut(&contents);
			}
		}

		Ok(metadata)
	}

	/// Write one item's metadata, then (per `options`, both on by default)
	/// the `.url` companion and the derived indexes. The per-item directory
	/// is expected to exist; it is host-created and never fabricated here.
	pub async fn write(
		&self,
		id: &str,
		metadata: &ItemMetadata,
		options: WriteOptions,
	) -> Result<(), LibraryIoError> {
		let path = self.library.paths().item_metadata_file(id);
		json::write_file_pretty(&path, metadata).await?;

		if options.write_url_companion && metadata.ext == URL_EXT {
			if let Some(url) = metadata.url.as_deref().filter(|u| !u.is_empty()) {
				self.write_companion(id, url).await?;
			}
		}

		if options.update_indexes {
			self.update_indexes(id, metadata).await?;
		}

		Ok(())
	}

	/// Item ids, read off the `images/` directory layout.
	pub async fn list_item_ids(&self) -> Result<Vec<String>, LibraryIoError> {
		let dir = self.library.paths().images_dir();
		let mut entries = fs::read_dir(&dir)
			.await
			.map_err(|e| FileIOError::from((&dir, e)))?;

		let mut ids = Vec::new();
		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| FileIOError::from((&dir, e)))?
		{
			let name = entry.file_name();
			let Some(name) = name.to_str() else {
				continue;
			};
			let Some(stem) = name.strip_suffix(ITEM_DIR_SUFFIX) else {
				continue;
			};

			if entry
				.file_type()
				.await
				.map(|kind| kind.is_dir())
				.unwrap_or(false)
			{
				ids.push(stem.to_owned());
			}
		}

		ids.sort();
		Ok(ids)
	}

	// An existing companion keeps its filename; otherwise `{id}.url`.
	async fn write_companion(&self, id: &str, url: &str) -> Result<(), LibraryIoError> {
		let target = match self.find_companion(id).await {
			Some(existing) => existing,
			None => self.library.paths().item_url_file(id),
		};

		fs::write(&target, format_internet_shortcut(url))
			.await
			.map_err(|e| FileIOError::from((&target, e)))?;

		Ok(())
	}

	async fn find_companion(&self, id: &str) -> Option<PathBuf> {
		let dir = self.library.paths().item_dir(id);
		let mut entries = fs::read_dir(&dir).await.ok()?;

		while let Ok(Some(entry)) = entries.next_entry().await {
			if let Some(name) = entry.file_name().to_str() {
				if name.ends_with(URL_COMPANION_SUFFIX) {
					return Some(entry.path());
				}
			}
		}

		None
	}

	// Index maintenance reads-or-defaults: a library without indexes yet
	// must still accept its first item write.
	async fn update_indexes(&self, id: &str, metadata: &ItemMetadata) -> Result<(), LibraryIoError> {
		let paths = self.library.paths();

		let mut mtimes: super::MtimeIndex = json::read_file_or_default(paths.mtime_file()).await;
		mtimes.insert(
			id.to_owned(),
			metadata
				.last_modified
				.or(metadata.modification_time)
				.unwrap_or_else(now_ms),
		);
		json::write_file_pretty(paths.mtime_file(), &mtimes).await?;

		let mut tags: super::TagsIndex = json::read_file_or_default(paths.tags_file()).await;
		for tag in &metadata.tags {
			tags.record_history(tag);
		}
		json::write_file_pretty(paths.tags_file(), &tags).await?;

		Ok(())
	}
}

/// `[InternetShortcut]` section, `URL=` line. Anything else in the file is
/// ignored.
fn parse_internet_shortcut(contents: &str) -> Option<String> {
	let mut in_section = false;

	for line in contents.lines() {
		let line = line.trim();
		if line.starts_with('[') && line.ends_with(']') {
			in_section = line.eq_ignore_ascii_case("[InternetShortcut]");
			continue;
		}
		if in_section {
			if let Some(url) = line.strip_prefix("URL=") {
				return Some(url.trim().to_owned());
			}
		}
	}

	None
}

fn format_internet_shortcut(url: &str) -> String {
	format!("[InternetShortcut]\nURL={url}\n")
}
