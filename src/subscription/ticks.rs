//! Poll tick bodies. A tick observes the host (or the disk), compares
//! against the poller's baseline under the state lock, and dispatches to the
//! subscribers that see a change. Host failures log, leave the baseline
//! untouched, and never fire; subscriber panics log and never stop a poller
//! or starve the remaining subscribers.

use std::{
	panic::{catch_unwind, AssertUnwindSafe},
	path::{Path, PathBuf},
	time::UNIX_EPOCH,
};

use tokio::fs;
use tracing::{debug, error, warn};

use crate::domain::Identified;
use crate::host::{extract_folder, extract_item};
use crate::library::LibraryPaths;
use crate::util::now_ms;

use super::{
	sequences_equal, Callback, ChangeEvent, ManagerInner, ManagerState, MtimePoller, MtimeSnapshot,
	SelectionPoller,
};

impl ManagerInner {
	// The root tick. On a path change it fires its own subscribers, then
	// cascade-resets every child baseline: the next tick of each child
	// treats its observation as the new baseline instead of a change.
	pub(super) fn tick_identity(&self) {
		let current = self.host.library_state();

		let (event, targets) = {
			let mut state = self.lock_state();

			let Some(previous) = state.identity.previous.take() else {
				state.identity.previous = Some(current);
				return;
			};

			if previous.path == current.path {
				state.identity.previous = Some(current);
				return;
			}

			debug!(
				previous = %previous.path,
				current = %current.path,
				"library switch detected"
			);

			let targets: Vec<(u64, Callback<_>)> = state
				.identity
				.subscribers
				.iter()
				.map(|(id, callback)| (*id, callback.clone()))
				.collect();

			state.identity.previous = Some(current.clone());
			state.item_selection.previous = None;
			state.folder_selection.previous = None;
			state.library_config.previous = None;
			state.folder_structure.previous = None;

			(
				ChangeEvent {
					previous,
					current,
					timestamp: now_ms(),
				},
				targets,
			)
		};

		self.dispatch(&event, targets, |state, id| {
			state.identity.subscribers.contains_key(&id)
		});
	}

	pub(super) async fn tick_item_selection(&self) {
		let records = match self.host.selected_items().await {
			Ok(records) => records,
			Err(e) => {
				warn!(error = %e, "item selection poll failed; skipping tick");
				return;
			}
		};

		let mut snapshots = Vec::with_capacity(records.len());
		for record in &records {
			match extract_item(record.as_ref()) {
				Ok(snapshot) => snapshots.push(snapshot),
				Err(e) => {
					warn!(error = %e, "item extraction failed during poll; skipping tick");
					return;
				}
			}
		}

		self.finish_selection_tick(snapshots, |state| &mut state.item_selection);
	}

	pub(super) async fn tick_folder_selection(&self) {
		let records = match self.host.selected_folders().await {
			Ok(records) => records,
			Err(e) => {
				warn!(error = %e, "folder selection poll failed; skipping tick");
				return;
			}
		};

		let mut snapshots = Vec::with_capacity(records.len());
		for record in &records {
			match extract_folder(record.as_ref()) {
				Ok(snapshot) => snapshots.push(snapshot),
				Err(e) => {
					warn!(error = %e, "folder extraction failed during poll; skipping tick");
					return;
				}
			}
		}

		self.finish_selection_tick(snapshots, |state| &mut state.folder_selection);
	}

	pub(super) async fn tick_library_config(&self) {
		let root = self.host.library_state().path;
		if root.is_empty() {
			debug!("library config poll skipped; no active library");
			return;
		}

		let path = LibraryPaths::new(&root).metadata_file();
		self.tick_mtime(&path, |state| &mut state.library_config).await;
	}

	pub(super) async fn tick_folder_structure(&self) {
		let root = self.host.library_state().path;
		if root.is_empty() {
			debug!("folder structure poll skipped; no active library");
			return;
		}

		self.tick_mtime(&PathBuf::from(root), |state| &mut state.folder_structure)
			.await;
	}

	// Change detection is per-subscriber: the baseline is shared, but each
	// subscriber's lookup cap decides whether this tick looks like a change
	// to them. The event always carries the full sequences.
	fn finish_selection_tick<S>(
		&self,
		current: Vec<S>,
		poller_of: impl Fn(&mut ManagerState) -> &mut SelectionPoller<S> + Copy,
	) where
		S: Identified + Clone,
	{
		let (event, targets) = {
			let mut state = self.lock_state();
			let poller = poller_of(&mut state);

			let Some(previous) = poller.previous.take() else {
				poller.previous = Some(current);
				return;
			};

			let targets: Vec<(u64, Callback<Vec<S>>)> = poller
				.subscribers
				.iter()
				.filter(|(_, subscriber)| {
					!sequences_equal(&previous, &current, subscriber.max_equal_lookups)
				})
				.map(|(id, subscriber)| (*id, subscriber.callback.clone()))
				.collect();

			poller.previous = Some(current.clone());

			if targets.is_empty() {
				return;
			}

			(
				ChangeEvent {
					previous,
					current,
					timestamp: now_ms(),
				},
				targets,
			)
		};

		self.dispatch(&event, targets, move |state, id| {
			poller_of(state).subscribers.contains_key(&id)
		});
	}

	async fn tick_mtime(
		&self,
		path: &Path,
		poller_of: impl Fn(&mut ManagerState) -> &mut MtimePoller + Copy,
	) {
		let mtime = match fs::metadata(path).await {
			Ok(metadata) => match metadata.modified() {
				Ok(modified) => modified
					.duration_since(UNIX_EPOCH)
					.map(|since| since.as_millis() as i64)
					.unwrap_or(0),
				Err(e) => {
					warn!(path = %path.display(), error = %e, "mtime unavailable; skipping tick");
					return;
				}
			},
			Err(e) => {
				warn!(path = %path.display(), error = %e, "stat failed; skipping tick");
				return;
			}
		};

		let (event, targets) = {
			let mut state = self.lock_state();
			let poller = poller_of(&mut state);

			let Some(previous) = poller.previous.take() else {
				poller.previous = Some(mtime);
				return;
			};

			poller.previous = Some(mtime);

			if previous == mtime {
				return;
			}

			let targets: Vec<(u64, Callback<MtimeSnapshot>)> = poller
				.subscribers
				.iter()
				.map(|(id, subscriber)| (*id, subscriber.callback.clone()))
				.collect();

			(
				ChangeEvent {
					previous: MtimeSnapshot { mtime: previous },
					current: MtimeSnapshot { mtime },
					timestamp: now_ms(),
				},
				targets,
			)
		};

		self.dispatch(&event, targets, move |state, id| {
			poller_of(state).subscribers.contains_key(&id)
		});
	}

	// Callbacks run outside the state lock, each inside an isolating
	// boundary, and only if their subscription is still present at dispatch
	// time.
	fn dispatch<T>(
		&self,
		event: &ChangeEvent<T>,
		targets: Vec<(u64, Callback<T>)>,
		still_subscribed: impl Fn(&mut ManagerState, u64) -> bool,
	) {
		for (id, callback) in targets {
			{
				let mut state = self.lock_state();
				if !still_subscribed(&mut state, id) {
					continue;
				}
			}

			if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
				error!(
					subscriber = id,
					"subscriber callback panicked; continuing with remaining subscribers"
				);
			}
		}
	}
}
