//! Polling-based change detection over a push-less host.
//!
//! One process-wide coordinator owns five pollers: library identity (the
//! root), item selection, folder selection, and two on-disk mtime watchers.
//! Pollers start lazily on first subscription and stop lazily at zero
//! subscribers. When the library identity changes, the root poller fires
//! its own subscribers and cascade-resets every child poller's baseline, so
//! the next child tick re-baselines against the new library without firing.
//!
//! Scheduling is cooperative: ticks run to completion, callbacks are never
//! reentrant-invoked, and no parallelism is required. Unsubscribing is the
//! only teardown; it prevents future invocations but does not abort a tick
//! already in flight.

mod events;
mod ticks;

use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc, Mutex, MutexGuard, PoisonError,
	},
	time::Duration,
};

use tokio::time::sleep;

use crate::domain::{FolderSnapshot, Identified, ItemSnapshot};
use crate::host::{Host, LibraryState};

pub use events::{ChangeEvent, MtimeSnapshot};

/// The library-identity poller's fixed cadence.
pub const LIBRARY_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default cadence for every other poller.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Sentinel for "compare the entire sequence".
pub const COMPARE_FULL_SEQUENCE: i32 = -1;

type Callback<T> = Arc<dyn Fn(&ChangeEvent<T>) + Send + Sync>;

/// Options for the on-disk pollers.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
	pub interval: Duration,
}

impl Default for PollOptions {
	fn default() -> Self {
		Self {
			interval: DEFAULT_POLL_INTERVAL,
		}
	}
}

/// Options for the selection pollers.
#[derive(Debug, Clone, Copy)]
pub struct SelectionOptions {
	pub interval: Duration,
	/// When positive, the comparator declares "changed" as soon as lengths
	/// differ or any of the first N positions differ; positions beyond N
	/// are ignored. The event payload always carries the full sequences.
	pub max_equal_lookups: i32,
}

impl Default for SelectionOptions {
	fn default() -> Self {
		Self {
			interval: DEFAULT_POLL_INTERVAL,
			max_equal_lookups: COMPARE_FULL_SEQUENCE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollerKind {
	LibraryIdentity,
	ItemSelection,
	FolderSelection,
	LibraryConfig,
	FolderStructure,
}

struct TaskControl {
	stop: Arc<AtomicBool>,
}

impl TaskControl {
	fn signal_stop(&self) {
		self.stop.store(true, Ordering::Release);
	}
}

#[derive(Default)]
struct IdentityPoller {
	subscribers: HashMap<u64, Callback<LibraryState>>,
	previous: Option<LibraryState>,
	control: Option<TaskControl>,
}

struct SelectionSubscriber<S> {
	callback: Callback<Vec<S>>,
	interval: Duration,
	max_equal_lookups: i32,
}

struct SelectionPoller<S> {
	subscribers: HashMap<u64, SelectionSubscriber<S>>,
	previous: Option<Vec<S>>,
	control: Option<TaskControl>,
}

impl<S> Default for SelectionPoller<S> {
	fn default() -> Self {
		Self {
			subscribers: HashMap::new(),
			previous: None,
			control: None,
		}
	}
}

struct MtimeSubscriber {
	callback: Callback<MtimeSnapshot>,
	interval: Duration,
}

#[derive(Default)]
struct MtimePoller {
	subscribers: HashMap<u64, MtimeSubscriber>,
	previous: Option<i64>,
	control: Option<TaskControl>,
}

#[derive(Default)]
struct ManagerState {
	next_id: u64,
	identity: IdentityPoller,
	item_selection: SelectionPoller<ItemSnapshot>,
	folder_selection: SelectionPoller<FolderSnapshot>,
	library_config: MtimePoller,
	folder_structure: MtimePoller,
}

impl ManagerState {
	fn allocate_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	fn child_subscriber_count(&self) -> usize {
		self.item_selection.subscribers.len()
			+ self.folder_selection.subscribers.len()
			+ self.library_config.subscribers.len()
			+ self.folder_structure.subscribers.len()
	}
}

pub(crate) struct ManagerInner {
	host: Arc<dyn Host>,
	state: Mutex<ManagerState>,
}

impl ManagerInner {
	fn lock_state(&self) -> MutexGuard<'_, ManagerState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn poll_interval(&self, kind: PollerKind) -> Duration {
		let state = self.lock_state();
		let intervals: Vec<Duration> = match kind {
			PollerKind::LibraryIdentity => return LIBRARY_POLL_INTERVAL,
			PollerKind::ItemSelection => state
				.item_selection
				.subscribers
				.values()
				.map(|s| s.interval)
				.collect(),
			PollerKind::FolderSelection => state
				.folder_selection
				.subscribers
				.values()
				.map(|s| s.interval)
				.collect(),
			PollerKind::LibraryConfig => state
				.library_config
				.subscribers
				.values()
				.map(|s| s.interval)
				.collect(),
			PollerKind::FolderStructure => state
				.folder_structure
				.subscribers
				.values()
				.map(|s| s.interval)
				.collect(),
		};

		intervals.into_iter().min().unwrap_or(DEFAULT_POLL_INTERVAL)
	}
}

/// The process-wide change coordinator. Clones share one underlying state.
///
/// Pollers are spawned tasks, so subscribing requires a running tokio
/// runtime; a `current_thread` runtime is sufficient.
#[derive(Clone)]
pub struct SubscriptionManager {
	inner: Arc<ManagerInner>,
}

impl SubscriptionManager {
	pub fn new(host: Arc<dyn Host>) -> Self {
		Self {
			inner: Arc::new(ManagerInner {
				host,
				state: Mutex::new(ManagerState::default()),
			}),
		}
	}

	/// Fires when the host's library `path` changes. Always polled at the
	/// fixed [`LIBRARY_POLL_INTERVAL`].
	pub fn on_library_changed(
		&self,
		callback: impl Fn(&ChangeEvent<LibraryState>) + Send + Sync + 'static,
	) -> SubscriptionHandle {
		let mut state = self.inner.lock_state();
		let id = state.allocate_id();
		state.identity.subscribers.insert(id, Arc::new(callback));
		self.ensure_identity_running(&mut state);

		SubscriptionHandle {
			inner: self.inner.clone(),
			kind: PollerKind::LibraryIdentity,
			id,
		}
	}

	pub fn on_item_selection_changed(
		&self,
		callback: impl Fn(&ChangeEvent<Vec<ItemSnapshot>>) + Send + Sync + 'static,
		options: SelectionOptions,
	) -> SubscriptionHandle {
		let mut state = self.inner.lock_state();
		let id = state.allocate_id();
		state.item_selection.subscribers.insert(
			id,
			SelectionSubscriber {
				callback: Arc::new(callback),
				interval: options.interval,
				max_equal_lookups: options.max_equal_lookups,
			},
		);

		self.ensure_running(&mut state, PollerKind::ItemSelection);
		self.ensure_identity_running(&mut state);

		SubscriptionHandle {
			inner: self.inner.clone(),
			kind: PollerKind::ItemSelection,
			id,
		}
	}

	pub fn on_folder_selection_changed(
		&self,
		callback: impl Fn(&ChangeEvent<Vec<FolderSnapshot>>) + Send + Sync + 'static,
		options: SelectionOptions,
	) -> SubscriptionHandle {
		let mut state = self.inner.lock_state();
		let id = state.allocate_id();
		state.folder_selection.subscribers.insert(
			id,
			SelectionSubscriber {
				callback: Arc::new(callback),
				interval: options.interval,
				max_equal_lookups: options.max_equal_lookups,
			},
		);

		self.ensure_running(&mut state, PollerKind::FolderSelection);
		self.ensure_identity_running(&mut state);

		SubscriptionHandle {
			inner: self.inner.clone(),
			kind: PollerKind::FolderSelection,
			id,
		}
	}

	/// Fires when `{library-root}/metadata.json` changes on disk.
	pub fn on_library_config_changed(
		&self,
		callback: impl Fn(&ChangeEvent<MtimeSnapshot>) + Send + Sync + 'static,
		options: PollOptions,
	) -> SubscriptionHandle {
		self.subscribe_mtime(callback, options, PollerKind::LibraryConfig)
	}

	/// Fires when the library root directory changes on disk.
	pub fn on_folder_structure_changed(
		&self,
		callback: impl Fn(&ChangeEvent<MtimeSnapshot>) + Send + Sync + 'static,
		options: PollOptions,
	) -> SubscriptionHandle {
		self.subscribe_mtime(callback, options, PollerKind::FolderStructure)
	}

	fn subscribe_mtime(
		&self,
		callback: impl Fn(&ChangeEvent<MtimeSnapshot>) + Send + Sync + 'static,
		options: PollOptions,
		kind: PollerKind,
	) -> SubscriptionHandle {
		let mut state = self.inner.lock_state();
		let id = state.allocate_id();
		let subscriber = MtimeSubscriber {
			callback: Arc::new(callback),
			interval: options.interval,
		};

		match kind {
			PollerKind::LibraryConfig => {
				state.library_config.subscribers.insert(id, subscriber);
			}
			_ => {
				state.folder_structure.subscribers.insert(id, subscriber);
			}
		}

		self.ensure_running(&mut state, kind);
		self.ensure_identity_running(&mut state);

		SubscriptionHandle {
			inner: self.inner.clone(),
			kind,
			id,
		}
	}

	fn ensure_identity_running(&self, state: &mut ManagerState) {
		if state.identity.control.is_none() {
			state.identity.control = Some(self.spawn_poller(PollerKind::LibraryIdentity));
		}
	}

	fn ensure_running(&self, state: &mut ManagerState, kind: PollerKind) {
		let control = match kind {
			PollerKind::LibraryIdentity => &mut state.identity.control,
			PollerKind::ItemSelection => &mut state.item_selection.control,
			PollerKind::FolderSelection => &mut state.folder_selection.control,
			PollerKind::LibraryConfig => &mut state.library_config.control,
			PollerKind::FolderStructure => &mut state.folder_structure.control,
		};

		if control.is_none() {
			*control = Some(self.spawn_poller(kind));
		}
	}

	fn spawn_poller(&self, kind: PollerKind) -> TaskControl {
		let stop = Arc::new(AtomicBool::new(false));
		tokio::spawn(run_poller(self.inner.clone(), kind, stop.clone()));

		TaskControl { stop }
	}
}

// The poller loop: an immediate first tick (which baselines without firing,
// because `previous` starts as none), then sleep-tick at the current minimum
// subscriber interval. The stop flag is observed at the loop head, so an
// in-flight tick always completes.
async fn run_poller(inner: Arc<ManagerInner>, kind: PollerKind, stop: Arc<AtomicBool>) {
	loop {
		if stop.load(Ordering::Acquire) {
			return;
		}

		match kind {
			PollerKind::LibraryIdentity => inner.tick_identity(),
			PollerKind::ItemSelection => inner.tick_item_selection().await,
			PollerKind::FolderSelection => inner.tick_folder_selection().await,
			PollerKind::LibraryConfig => inner.tick_library_config().await,
			PollerKind::FolderStructure => inner.tick_folder_structure().await,
		}

		if stop.load(Ordering::Acquire) {
			return;
		}

		sleep(inner.poll_interval(kind)).await;
	}
}

/// Two id sequences are equal iff they have the same length and agree
/// pairwise over the first `min(N, length)` positions. Position-sensitive by
/// design of the host selection order: a reordered identical set is a
/// change.
fn sequences_equal<S: Identified>(previous: &[S], current: &[S], max_equal_lookups: i32) -> bool {
	if previous.len() != current.len() {
		return false;
	}

	let limit = if max_equal_lookups < 0 {
		previous.len()
	} else {
		(max_equal_lookups as usize).min(previous.len())
	};

	previous[..limit]
		.iter()
		.zip(&current[..limit])
		.all(|(a, b)| a.ident() == b.ident())
}

/// Scoped release handle: invoking [`Self::unsubscribe`] is the only
/// supported teardown.
pub struct SubscriptionHandle {
	inner: Arc<ManagerInner>,
	kind: PollerKind,
	id: u64,
}

impl SubscriptionHandle {
	pub fn unsubscribe(self) {
		let mut state = self.inner.lock_state();

		match self.kind {
			PollerKind::LibraryIdentity => {
				state.identity.subscribers.remove(&self.id);
			}
			PollerKind::ItemSelection => {
				state.item_selection.subscribers.remove(&self.id);
				if state.item_selection.subscribers.is_empty() {
					if let Some(control) = state.item_selection.control.take() {
						control.signal_stop();
					}
					state.item_selection.previous = None;
				}
			}
			PollerKind::FolderSelection => {
				state.folder_selection.subscribers.remove(&self.id);
				if state.folder_selection.subscribers.is_empty() {
					if let Some(control) = state.folder_selection.control.take() {
						control.signal_stop();
					}
					state.folder_selection.previous = None;
				}
			}
			PollerKind::LibraryConfig => {
				state.library_config.subscribers.remove(&self.id);
				if state.library_config.subscribers.is_empty() {
					if let Some(control) = state.library_config.control.take() {
						control.signal_stop();
					}
					state.library_config.previous = None;
				}
			}
			PollerKind::FolderStructure => {
				state.folder_structure.subscribers.remove(&self.id);
				if state.folder_structure.subscribers.is_empty() {
					if let Some(control) = state.folder_structure.control.take() {
						control.signal_stop();
					}
					state.folder_structure.previous = None;
				}
			}
		}

		// The root poller outlives its own subscribers while any child is
		// active, and stops only when nothing at all remains.
		if state.identity.subscribers.is_empty() && state.child_subscriber_count() == 0 {
			if let Some(control) = state.identity.control.take() {
				control.signal_stop();
			}
			state.identity.previous = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::AtomicUsize;

	use tokio::time::sleep;

	use crate::testing::{folder, item, ScriptedHost};

	use super::*;

	fn scripted() -> (Arc<ScriptedHost>, SubscriptionManager) {
		let host = Arc::new(ScriptedHost::new("/tmp/unused-home"));
		host.set_library("/libs/first", "first");
		let manager = SubscriptionManager::new(host.clone() as Arc<dyn Host>);
		(host, manager)
	}

	// Long enough that spawned timers never tick again during a test; all
	// interesting ticks are driven by hand through the inner manager.
	fn slow() -> SelectionOptions {
		SelectionOptions {
			interval: Duration::from_secs(3600),
			..Default::default()
		}
	}

	#[test]
	fn comparator_full_and_limited() {
		let a = [item("a", &[], None, "png"), item("b", &[], None, "png")];
		let b = [item("a", &[], None, "png"), item("c", &[], None, "png")];

		assert!(!sequences_equal(&a, &b, COMPARE_FULL_SEQUENCE));
		// first position agrees, the difference sits beyond the lookup cap
		assert!(sequences_equal(&a, &b, 1));
		assert!(!sequences_equal(&a, &b, 2));
		// length differences always count, whatever the cap
		assert!(!sequences_equal(&a, &b[..1], 1));
		// reorder of the same set is a change
		let reordered = [item("b", &[], None, "png"), item("a", &[], None, "png")];
		assert!(!sequences_equal(&a, &reordered, COMPARE_FULL_SEQUENCE));
	}

	#[tokio::test]
	async fn selection_baseline_then_change_fires_with_full_payload() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png")]);

		let events: Arc<Mutex<Vec<ChangeEvent<Vec<ItemSnapshot>>>>> =
			Arc::new(Mutex::new(Vec::new()));
		let sink = events.clone();
		let handle = manager.on_item_selection_changed(
			move |event| sink.lock().unwrap().push(event.clone()),
			slow(),
		);

		// the spawned first tick baselines without firing
		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_item_selection().await;
		assert!(events.lock().unwrap().is_empty());

		host.set_selected_items(vec![item("a", &[], None, "png"), item("b", &[], None, "png")]);
		manager.inner.tick_item_selection().await;

		let fired = events.lock().unwrap();
		assert_eq!(fired.len(), 1);
		assert_eq!(fired[0].previous.len(), 1);
		assert_eq!(fired[0].current.len(), 2);
		assert!(fired[0].timestamp > 0);
		drop(fired);

		handle.unsubscribe();
	}

	#[tokio::test]
	async fn max_equal_lookups_ignores_trailing_positions() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png"), item("b", &[], None, "png")]);

		let shallow_count = Arc::new(AtomicUsize::new(0));
		let full_count = Arc::new(AtomicUsize::new(0));

		let shallow_sink = shallow_count.clone();
		let shallow = manager.on_item_selection_changed(
			move |_| {
				shallow_sink.fetch_add(1, Ordering::SeqCst);
			},
			SelectionOptions {
				max_equal_lookups: 1,
				..slow()
			},
		);
		let full_sink = full_count.clone();
		let full = manager.on_item_selection_changed(
			move |_| {
				full_sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);

		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_item_selection().await;

		// same length, same first position, different tail
		host.set_selected_items(vec![item("a", &[], None, "png"), item("c", &[], None, "png")]);
		manager.inner.tick_item_selection().await;

		assert_eq!(shallow_count.load(Ordering::SeqCst), 0);
		assert_eq!(full_count.load(Ordering::SeqCst), 1);

		shallow.unsubscribe();
		full.unsubscribe();
	}

	#[tokio::test]
	async fn no_callback_after_unsubscribe() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png")]);

		let count = Arc::new(AtomicUsize::new(0));
		let sink = count.clone();
		let handle = manager.on_item_selection_changed(
			move |_| {
				sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);

		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_item_selection().await;
		handle.unsubscribe();

		// the poller stopped and cleared its baseline with its last subscriber
		{
			let state = manager.inner.lock_state();
			assert!(state.item_selection.control.is_none());
			assert!(state.item_selection.previous.is_none());
		}

		host.set_selected_items(vec![]);
		manager.inner.tick_item_selection().await;

		assert_eq!(count.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn host_failure_skips_the_tick_and_keeps_the_baseline() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png")]);

		let count = Arc::new(AtomicUsize::new(0));
		let sink = count.clone();
		let handle = manager.on_item_selection_changed(
			move |_| {
				sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);

		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_item_selection().await;

		host.set_fail_selection(true);
		host.set_selected_items(vec![]);
		manager.inner.tick_item_selection().await;
		assert_eq!(count.load(Ordering::SeqCst), 0);

		// once the host recovers, the change registers against the old baseline
		host.set_fail_selection(false);
		manager.inner.tick_item_selection().await;
		assert_eq!(count.load(Ordering::SeqCst), 1);

		handle.unsubscribe();
	}

	#[tokio::test]
	async fn panicking_subscriber_does_not_starve_the_others() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png")]);

		let count = Arc::new(AtomicUsize::new(0));
		let panicking = manager.on_item_selection_changed(
			|_| panic!("subscriber bug"),
			slow(),
		);
		let sink = count.clone();
		let well_behaved = manager.on_item_selection_changed(
			move |_| {
				sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);

		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_item_selection().await;

		host.set_selected_items(vec![]);
		manager.inner.tick_item_selection().await;

		assert_eq!(count.load(Ordering::SeqCst), 1);

		panicking.unsubscribe();
		well_behaved.unsubscribe();
	}

	#[tokio::test]
	async fn library_switch_cascades_without_spurious_child_events() {
		let (host, manager) = scripted();
		host.set_selected_items(vec![item("a", &[], None, "png")]);
		host.set_selected_folders(vec![folder("f1")]);

		let library_events = Arc::new(AtomicUsize::new(0));
		let item_events = Arc::new(AtomicUsize::new(0));
		let folder_events = Arc::new(AtomicUsize::new(0));

		let library_sink = library_events.clone();
		let on_library = manager.on_library_changed(move |event| {
			assert_eq!(event.current.path, "/libs/second");
			library_sink.fetch_add(1, Ordering::SeqCst);
		});
		let item_sink = item_events.clone();
		let on_items = manager.on_item_selection_changed(
			move |_| {
				item_sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);
		let folder_sink = folder_events.clone();
		let on_folders = manager.on_folder_selection_changed(
			move |_| {
				folder_sink.fetch_add(1, Ordering::SeqCst);
			},
			slow(),
		);

		// baseline everything against the first library
		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_identity();
		manager.inner.tick_item_selection().await;
		manager.inner.tick_folder_selection().await;

		// switch libraries; the new library has entirely different selections
		host.set_library("/libs/second", "second");
		host.set_selected_items(vec![item("x", &[], None, "png")]);
		host.set_selected_folders(vec![folder("fx")]);

		manager.inner.tick_identity();
		assert_eq!(library_events.load(Ordering::SeqCst), 1);

		// children re-baseline without firing, even though their sequences
		// are drawn from a different library now
		manager.inner.tick_item_selection().await;
		manager.inner.tick_folder_selection().await;
		assert_eq!(item_events.load(Ordering::SeqCst), 0);
		assert_eq!(folder_events.load(Ordering::SeqCst), 0);

		// real changes after the re-baseline fire normally
		host.set_selected_items(vec![]);
		manager.inner.tick_item_selection().await;
		assert_eq!(item_events.load(Ordering::SeqCst), 1);

		// a second identity tick with an unchanged path stays quiet
		manager.inner.tick_identity();
		assert_eq!(library_events.load(Ordering::SeqCst), 1);

		on_library.unsubscribe();
		on_items.unsubscribe();
		on_folders.unsubscribe();

		let state = manager.inner.lock_state();
		assert!(state.identity.control.is_none());
	}

	#[tokio::test]
	async fn mtime_poller_fires_on_disk_changes() {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path().to_string_lossy().to_string();

		let host = Arc::new(ScriptedHost::new("/tmp/unused-home"));
		host.set_library(&root, "lib");
		let manager = SubscriptionManager::new(host.clone() as Arc<dyn Host>);

		let metadata_path = dir.path().join("metadata.json");
		std::fs::write(&metadata_path, b"{}").unwrap();
		set_mtime(&metadata_path, 1_000);

		let events: Arc<Mutex<Vec<ChangeEvent<MtimeSnapshot>>>> = Arc::new(Mutex::new(Vec::new()));
		let sink = events.clone();
		let handle = manager.on_library_config_changed(
			move |event| sink.lock().unwrap().push(event.clone()),
			PollOptions {
				interval: Duration::from_secs(3600),
			},
		);

		sleep(Duration::from_millis(50)).await;
		manager.inner.tick_library_config().await;
		assert!(events.lock().unwrap().is_empty());

		set_mtime(&metadata_path, 2_000);
		manager.inner.tick_library_config().await;

		let fired = events.lock().unwrap();
		assert_eq!(fired.len(), 1);
		assert_eq!(fired[0].previous.mtime, 1_000_000);
		assert_eq!(fired[0].current.mtime, 2_000_000);
		drop(fired);

		// a vanished file logs and keeps the baseline rather than firing
		std::fs::remove_file(&metadata_path).unwrap();
		manager.inner.tick_library_config().await;
		assert_eq!(events.lock().unwrap().len(), 1);

		handle.unsubscribe();
	}

	fn set_mtime(path: &std::path::Path, epoch_secs: u64) {
		let file = std::fs::File::options().write(true).open(path).unwrap();
		file.set_modified(
			std::time::UNIX_EPOCH + Duration::from_secs(epoch_secs),
		)
		.unwrap();
	}
}
