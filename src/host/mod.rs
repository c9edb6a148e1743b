//! The boundary to the host application's in-process object API.
//!
//! Only the surface the core consumes is contracted here. The host hands out
//! live records whose fields are reachable exclusively through accessor
//! methods; no structural copy of a live record exists, which is why every
//! consumer in this crate goes through [`extract_item`] / [`extract_folder`]
//! before comparing, serializing, or persisting anything.

mod extract;
mod record;

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use extract::{extract_folder, extract_item};
pub use record::{FolderRecord, ItemRecord};

#[derive(Debug, Error)]
pub enum HostError {
	#[error("host API error: {0}")]
	Api(String),
	#[error("host record is no longer live: {0}")]
	DeadRecord(String),
}

/// The host's current library identity. A missing or inaccessible host
/// context is represented by the empty state, never by an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryState {
	pub path: String,
	pub name: String,
}

impl LibraryState {
	pub fn is_empty(&self) -> bool {
		self.path.is_empty() && self.name.is_empty()
	}
}

/// The in-process host API surface the core consumes.
///
/// The home directory query is the only home-directory source in the crate;
/// the process environment is deliberately never consulted, so placement is
/// identical under the host's renderer and any out-of-host runner.
#[async_trait]
pub trait Host: Send + Sync {
	fn library_state(&self) -> LibraryState;

	async fn home_dir(&self) -> Result<PathBuf, HostError>;

	async fn selected_items(&self) -> Result<Vec<Arc<dyn ItemRecord>>, HostError>;
	async fn selected_folders(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError>;

	async fn all_items(&self) -> Result<Vec<Arc<dyn ItemRecord>>, HostError>;
	async fn all_folders(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError>;

	async fn item_by_id(&self, id: &str) -> Result<Option<Arc<dyn ItemRecord>>, HostError>;
	async fn folder_by_id(&self, id: &str) -> Result<Option<Arc<dyn FolderRecord>>, HostError>;
}
