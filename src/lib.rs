//! cooler-core
//!
//! A reactive data layer for plugins running inside an Eagle-style asset
//! manager. The host exposes an in-process object API plus a localhost HTTP
//! control plane, but pushes no change notifications and stores its state in
//! plain JSON files on disk. This crate fills the gap with four coupled
//! subsystems:
//!
//! - [`filter`] — a declarative, serializable predicate DSL over item
//!   snapshots, with a fluent builder and a pure evaluator.
//! - [`subscription`] — a polling-based change detection layer (selection,
//!   library switches, on-disk mutation) with cascading invalidation.
//! - [`config`] — a persistent key/value store partitioned by deterministic
//!   scope hashing, including a library-identity regime backed by a
//!   persistent UUID file.
//! - [`library`] — direct JSON manipulation of the host's on-disk library
//!   layout with clone-mutate-replace semantics.
//!
//! Live host records expose their fields only through accessors; [`host`]
//! defines that boundary and the snapshot extraction that makes records
//! usable as plain data.

pub mod config;
pub mod domain;
pub mod filter;
pub mod host;
pub mod http;
pub mod library;
pub mod plugin;
pub mod subscription;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{FolderSnapshot, ItemSnapshot};
pub use filter::{FilterBuilder, FilterCondition, FilterRule, ItemFilter, Match, Method, Property};
pub use host::{extract_folder, extract_item, Host, HostError, LibraryState};
pub use subscription::SubscriptionManager;
