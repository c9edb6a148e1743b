use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::fs;

use crate::host::Host;
use crate::plugin;
use crate::util::{error::FileIOError, json};

use super::{
	scope::{self, LibraryKeyMode},
	ConfigError, ConfigScope,
};

const CONFIG_HOME_DIR: &str = ".eaglecooler";
const CONFIG_SUB_DIR: &str = "config";

/// One scope's view into the shared configuration files.
///
/// Instances are cheap; nothing is cached between operations. Each call
/// loads the backing file fresh (missing or unparsable reads as empty),
/// resolves the section key — which in UUID mode may lazily create the
/// library's identity file — and, for mutations, writes the whole file back.
#[derive(Clone)]
pub struct ConfigStore {
	host: Arc<dyn Host>,
	scope: ConfigScope,
}

impl ConfigStore {
	pub fn new(host: Arc<dyn Host>, scope: ConfigScope) -> Self {
		Self { host, scope }
	}

	pub fn scope(&self) -> ConfigScope {
		self.scope
	}

	pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
		let section = self.read_section().await?;

		section
			.get(key)
			.cloned()
			.map(|value| serde_json::from_value(value).map_err(ConfigError::from))
			.transpose()
	}

	pub async fn get_or_default<T: DeserializeOwned>(
		&self,
		key: &str,
		default: T,
	) -> Result<T, ConfigError> {
		Ok(self.get(key).await?.unwrap_or(default))
	}

	pub async fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), ConfigError> {
		let value = serde_json::to_value(value)?;
		self.with_section(|section| {
			section.insert(key.to_owned(), value);
		})
		.await
	}

	pub async fn set_many(&self, patch: Map<String, Value>) -> Result<(), ConfigError> {
		self.with_section(|section| {
			for (key, value) in patch {
				section.insert(key, value);
			}
		})
		.await
	}

	/// Returns whether the key existed.
	pub async fn remove(&self, key: &str) -> Result<bool, ConfigError> {
		self.with_section(|section| section.remove(key).is_some())
			.await
	}

	pub async fn has(&self, key: &str) -> Result<bool, ConfigError> {
		Ok(self.read_section().await?.contains_key(key))
	}

	/// Empty this scope's section only; sibling sections are untouched.
	pub async fn clear(&self) -> Result<(), ConfigError> {
		self.with_section(Map::clear).await
	}

	pub async fn keys(&self) -> Result<Vec<String>, ConfigError> {
		Ok(self.read_section().await?.keys().cloned().collect())
	}

	pub async fn get_all(&self) -> Result<Map<String, Value>, ConfigError> {
		self.read_section().await
	}

	async fn read_section(&self) -> Result<Map<String, Value>, ConfigError> {
		let path = self.file_path().await?;
		let document = load_document(&path).await;

		Ok(match self.section_key().await? {
			None => document,
			Some(key) => document
				.get(&key)
				.and_then(Value::as_object)
				.cloned()
				.unwrap_or_default(),
		})
	}

	// Mutations re-read the whole file immediately before the section edit;
	// sibling sections survive because they ride along in the same document,
	// not by accident of caching.
	async fn with_section<R>(
		&self,
		mutate: impl FnOnce(&mut Map<String, Value>) -> R,
	) -> Result<R, ConfigError> {
		let path = self.file_path().await?;
		let key = self.section_key().await?;

		let mut document = load_document(&path).await;
		let result = match &key {
			None => mutate(&mut document),
			Some(key) => {
				let mut section = document
					.get(key)
					.and_then(Value::as_object)
					.cloned()
					.unwrap_or_default();
				let result = mutate(&mut section);
				document.insert(key.clone(), Value::Object(section));
				result
			}
		};

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| FileIOError::from((parent, e, "failed to create config directory")))?;
		}
		json::write_file_pretty(&path, &document).await?;

		Ok(result)
	}

	async fn file_path(&self) -> Result<PathBuf, ConfigError> {
		let home = self.host.home_dir().await?;

		Ok(home
			.join(CONFIG_HOME_DIR)
			.join(CONFIG_SUB_DIR)
			.join(self.scope.file_name()))
	}

	async fn section_key(&self) -> Result<Option<String>, ConfigError> {
		let plugin_id = if self.scope.needs_plugin_id() {
			Some(
				plugin::plugin_id().ok_or(ConfigError::PluginContextNotInitialized)?,
			)
		} else {
			None
		};

		let identifier = match self.scope {
			ConfigScope::Global { per_plugin: false } => return Ok(None),
			ConfigScope::Global { per_plugin: true } | ConfigScope::Plugin => {
				plugin_id.unwrap_or_default().to_owned()
			}
			ConfigScope::Library { per_plugin, key } => {
				let state = self.host.library_state();
				let base = match key {
					LibraryKeyMode::Path => state.path,
					LibraryKeyMode::Name => state.name,
					LibraryKeyMode::Uuid => scope::library_uuid(Path::new(&state.path))
						.await?
						.to_string(),
				};

				if per_plugin {
					format!("{base}{}", plugin_id.unwrap_or_default())
				} else {
					base
				}
			}
		};

		Ok(Some(scope::section_key(&identifier)))
	}
}

/// Missing or unparsable files read as the empty document; config files are
/// optional by contract.
async fn load_document(path: &Path) -> Map<String, Value> {
	json::read_file_or_default::<Value>(path)
		.await
		.as_object()
		.cloned()
		.unwrap_or_default()
}
