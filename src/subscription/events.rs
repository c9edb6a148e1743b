use serde::Serialize;

/// Every change event carries the full previous and current observations,
/// plus the wall-clock dispatch time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent<T> {
	pub previous: T,
	pub current: T,
	pub timestamp: i64,
}

/// Payload of the on-disk pollers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MtimeSnapshot {
	pub mtime: i64,
}
