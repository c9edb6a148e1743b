//! Scoped, persistent key/value configuration.
//!
//! Physical storage is one of four shared JSON files under
//! `{home}/.eaglecooler/config/`; the logical key space is partitioned by a
//! hashed section key derived from the scope descriptor. Every operation
//! re-reads the file before touching it and writes the whole file back; no
//! locking is attempted and cross-process races are accepted.

mod scope;
mod store;

pub use scope::{
	ConfigScope, LibraryKeyMode, GLOBAL_FILE, GLOBAL_PER_PLUGIN_FILE, LIBRARY_FILE,
	LIBRARY_UUID_FILE, PLUGIN_FILE,
};
pub use store::ConfigStore;

use thiserror::Error;

use crate::host::HostError;
use crate::util::{error::FileIOError, json::JsonFileError};

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	Host(#[from] HostError),
	#[error("plugin context is not initialized; call init_plugin_context first")]
	PluginContextNotInitialized,
}

impl From<JsonFileError> for ConfigError {
	fn from(e: JsonFileError) -> Self {
		match e {
			JsonFileError::Io(e) => Self::FileIO(e),
			JsonFileError::Serde(e) => Self::SerdeJson(e),
		}
	}
}
