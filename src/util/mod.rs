pub mod error;
pub(crate) mod json;

use chrono::Utc;

/// Current wall-clock time as epoch milliseconds, the unit every host-facing
/// timestamp in this crate uses.
pub(crate) fn now_ms() -> i64 {
	Utc::now().timestamp_millis()
}
