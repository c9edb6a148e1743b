//! Scope descriptors and section-key derivation.
//!
//! A configuration instance is pinned to one of four well-known files and,
//! within a file, to a section keyed by the first 16 lowercase hex chars of
//! SHA-256 over a scope-specific identifier. The wide-global scope is the
//! one regime with no section key: it owns its file's document root.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::util::json;

use super::ConfigError;

pub const GLOBAL_FILE: &str = "global.json";
pub const GLOBAL_PER_PLUGIN_FILE: &str = "globalPerPlugin.json";
pub const PLUGIN_FILE: &str = "plugin.json";
pub const LIBRARY_FILE: &str = "library.json";

/// Name of the persistent identity file inside a library root.
pub const LIBRARY_UUID_FILE: &str = "cooler-uuid.json";

const SECTION_KEY_LEN: usize = 16;

/// Which library identifier a library scope hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibraryKeyMode {
	/// The library root path. Breaks when the user moves the library.
	#[default]
	Path,
	/// The library display name. Survives moves, collides across same-named
	/// libraries.
	Name,
	/// A UUID persisted inside the library root. Survives both moves and
	/// renames.
	Uuid,
}

/// The tuple of options determining which file and section key a
/// configuration instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
	Global { per_plugin: bool },
	Plugin,
	Library { per_plugin: bool, key: LibraryKeyMode },
}

impl ConfigScope {
	pub(super) fn file_name(&self) -> &'static str {
		match self {
			Self::Global { per_plugin: false } => GLOBAL_FILE,
			Self::Global { per_plugin: true } => GLOBAL_PER_PLUGIN_FILE,
			Self::Plugin => PLUGIN_FILE,
			Self::Library { .. } => LIBRARY_FILE,
		}
	}

	pub(super) fn needs_plugin_id(&self) -> bool {
		matches!(
			self,
			Self::Global { per_plugin: true }
				| Self::Plugin
				| Self::Library {
					per_plugin: true,
					..
				}
		)
	}
}

/// First 16 lowercase hex chars of SHA-256.
pub(super) fn section_key(identifier: &str) -> String {
	let digest = Sha256::digest(identifier.as_bytes());
	let mut hex = String::with_capacity(SECTION_KEY_LEN);

	for byte in digest.iter().take(SECTION_KEY_LEN / 2) {
		hex.push_str(&format!("{byte:02x}"));
	}

	hex
}

#[derive(Debug, Serialize, Deserialize)]
struct UuidDocument {
	uuid: Uuid,
}

/// Read the library's persistent UUID, generating and persisting a fresh v4
/// on first access. The file is never deleted by this crate.
pub(super) async fn library_uuid(library_root: &Path) -> Result<Uuid, ConfigError> {
	let path = library_root.join(LIBRARY_UUID_FILE);

	match json::read_file::<UuidDocument>(&path).await {
		Ok(doc) => Ok(doc.uuid),
		Err(_) => {
			let doc = UuidDocument {
				uuid: Uuid::new_v4(),
			};
			json::write_file_pretty(&path, &doc).await?;
			Ok(doc.uuid)
		}
	}
}
