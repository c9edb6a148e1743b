//! In-memory test doubles shared across the crate's unit tests. The
//! scripted host stands in for the real in-process API: tests mutate its
//! state between poll ticks the way a user would.

use std::{
	path::PathBuf,
	sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{FolderSnapshot, ItemSnapshot};
use crate::host::{FolderRecord, Host, HostError, ItemRecord, LibraryState};
use crate::plugin::{init_plugin_context, PluginManifest};

pub(crate) const TEST_PLUGIN_ID: &str = "P";

/// Pin the process-wide plugin identity for tests. Safe to call from every
/// test; only the first call wins, and they all agree on the id.
pub(crate) fn init_test_plugin() {
	init_plugin_context(&PluginManifest {
		id: Some(TEST_PLUGIN_ID.to_owned()),
		name: None,
	});
}

/// A minimal item snapshot with the fields most tests care about.
pub(crate) fn item(id: &str, tags: &[&str], star: Option<u8>, ext: &str) -> ItemSnapshot {
	ItemSnapshot {
		id: id.to_owned(),
		name: id.to_owned(),
		ext: ext.to_owned(),
		url: String::new(),
		annotation: String::new(),
		width: 100,
		height: 100,
		size: 1024,
		star,
		imported_at: 1_700_000_000_000,
		modified_at: 1_700_000_000_000,
		tags: tags.iter().map(|t| (*t).to_owned()).collect(),
		folders: Vec::new(),
		is_deleted: false,
	}
}

pub(crate) fn folder(id: &str) -> FolderSnapshot {
	FolderSnapshot {
		id: id.to_owned(),
		name: id.to_owned(),
		description: String::new(),
		icon: None,
		icon_color: None,
		created_at: 1_700_000_000_000,
		parent: None,
		children: Vec::new(),
	}
}

/// A live-folder stand-in with explicit accessor behavior, including a
/// "dead handle" mode where every accessor fails.
pub(crate) struct FakeFolderRecord {
	snapshot: FolderSnapshot,
	children: Vec<Arc<dyn FolderRecord>>,
	dead: bool,
}

impl FakeFolderRecord {
	pub(crate) fn new(id: &str, name: &str) -> Self {
		let mut snapshot = folder(id);
		snapshot.name = name.to_owned();
		Self {
			snapshot,
			children: Vec::new(),
			dead: false,
		}
	}

	pub(crate) fn from_snapshot(snapshot: FolderSnapshot) -> Self {
		Self {
			snapshot,
			children: Vec::new(),
			dead: false,
		}
	}

	pub(crate) fn with_children(mut self, children: Vec<FakeFolderRecord>) -> Self {
		self.children = children
			.into_iter()
			.map(|child| Arc::new(child) as Arc<dyn FolderRecord>)
			.collect();
		self
	}

	pub(crate) fn dead(mut self) -> Self {
		self.dead = true;
		self
	}

	fn accessor<T>(&self, value: T) -> Result<T, HostError> {
		if self.dead {
			return Err(HostError::DeadRecord(self.snapshot.id.clone()));
		}
		Ok(value)
	}
}

impl FolderRecord for FakeFolderRecord {
	fn id(&self) -> Result<String, HostError> {
		self.accessor(self.snapshot.id.clone())
	}

	fn name(&self) -> Result<String, HostError> {
		self.accessor(self.snapshot.name.clone())
	}

	fn description(&self) -> Result<String, HostError> {
		self.accessor(self.snapshot.description.clone())
	}

	fn icon(&self) -> Result<Option<String>, HostError> {
		self.accessor(self.snapshot.icon.clone())
	}

	fn icon_color(&self) -> Result<Option<String>, HostError> {
		self.accessor(self.snapshot.icon_color.clone())
	}

	fn created_at(&self) -> Result<i64, HostError> {
		self.accessor(self.snapshot.created_at)
	}

	fn parent(&self) -> Result<Option<String>, HostError> {
		self.accessor(self.snapshot.parent.clone())
	}

	fn children(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError> {
		if self.dead {
			return Err(HostError::DeadRecord(self.snapshot.id.clone()));
		}
		Ok(self.children.clone())
	}
}

/// Scripted in-memory host.
pub(crate) struct ScriptedHost {
	home: PathBuf,
	state: Mutex<LibraryState>,
	selected_items: Mutex<Vec<ItemSnapshot>>,
	selected_folders: Mutex<Vec<FolderSnapshot>>,
	fail_selection: Mutex<bool>,
}

impl ScriptedHost {
	pub(crate) fn new(home: impl Into<PathBuf>) -> Self {
		Self {
			home: home.into(),
			state: Mutex::new(LibraryState::default()),
			selected_items: Mutex::new(Vec::new()),
			selected_folders: Mutex::new(Vec::new()),
			fail_selection: Mutex::new(false),
		}
	}

	pub(crate) fn set_library(&self, path: &str, name: &str) {
		*self.state.lock().unwrap() = LibraryState {
			path: path.to_owned(),
			name: name.to_owned(),
		};
	}

	pub(crate) fn set_selected_items(&self, items: Vec<ItemSnapshot>) {
		*self.selected_items.lock().unwrap() = items;
	}

	pub(crate) fn set_selected_folders(&self, folders: Vec<FolderSnapshot>) {
		*self.selected_folders.lock().unwrap() = folders;
	}

	pub(crate) fn set_fail_selection(&self, fail: bool) {
		*self.fail_selection.lock().unwrap() = fail;
	}

	pub(crate) fn home_dir_blocking(&self) -> PathBuf {
		self.home.clone()
	}

	fn selection_guard(&self) -> Result<(), HostError> {
		if *self.fail_selection.lock().unwrap() {
			return Err(HostError::Api("scripted selection failure".to_owned()));
		}
		Ok(())
	}
}

#[async_trait]
impl Host for ScriptedHost {
	fn library_state(&self) -> LibraryState {
		self.state.lock().unwrap().clone()
	}

	async fn home_dir(&self) -> Result<PathBuf, HostError> {
		Ok(self.home.clone())
	}

	async fn selected_items(&self) -> Result<Vec<Arc<dyn ItemRecord>>, HostError> {
		self.selection_guard()?;
		Ok(self
			.selected_items
			.lock()
			.unwrap()
			.iter()
			.cloned()
			.map(|snapshot| Arc::new(snapshot) as Arc<dyn ItemRecord>)
			.collect())
	}

	async fn selected_folders(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError> {
		self.selection_guard()?;
		Ok(self
			.selected_folders
			.lock()
			.unwrap()
			.iter()
			.cloned()
			.map(|snapshot| {
				Arc::new(FakeFolderRecord::from_snapshot(snapshot)) as Arc<dyn FolderRecord>
			})
			.collect())
	}

	async fn all_items(&self) -> Result<Vec<Arc<dyn ItemRecord>>, HostError> {
		self.selected_items().await
	}

	async fn all_folders(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError> {
		self.selected_folders().await
	}

	async fn item_by_id(&self, id: &str) -> Result<Option<Arc<dyn ItemRecord>>, HostError> {
		Ok(self
			.selected_items
			.lock()
			.unwrap()
			.iter()
			.find(|snapshot| snapshot.id == id)
			.cloned()
			.map(|snapshot| Arc::new(snapshot) as Arc<dyn ItemRecord>))
	}

	async fn folder_by_id(&self, id: &str) -> Result<Option<Arc<dyn FolderRecord>>, HostError> {
		Ok(self
			.selected_folders
			.lock()
			.unwrap()
			.iter()
			.find(|snapshot| snapshot.id == id)
			.cloned()
			.map(|snapshot| {
				Arc::new(FakeFolderRecord::from_snapshot(snapshot)) as Arc<dyn FolderRecord>
			}))
	}
}
