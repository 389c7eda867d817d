//! Injectable time source used for every expiry computation.
//!
//! Token issuance never reads the ambient clock directly. It asks a [`Clock`] instead, so tests
//! substitute a [`FixedClock`] and get deterministic `expires_at` values.

// self
use crate::_prelude::*;

/// Source of the current instant plus pure offset arithmetic.
///
/// Only [`now`](Clock::now) and [`timestamp`](Clock::timestamp) observe the outside world; the
/// offset helpers take the instant by value and always return a new one.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current instant.
	fn now(&self) -> OffsetDateTime;

	/// Returns the current instant as milliseconds since the Unix epoch.
	fn timestamp(&self) -> i64 {
		unix_millis(self.now())
	}

	/// Returns `instant` moved by `seconds` (negative values move backwards).
	fn add_seconds(&self, instant: OffsetDateTime, seconds: i64) -> OffsetDateTime {
		instant.saturating_add(Duration::seconds(seconds))
	}

	/// Returns `instant` moved by `minutes`; fractional minutes resolve to whole milliseconds,
	/// truncating toward zero.
	fn add_minutes(&self, instant: OffsetDateTime, minutes: f64) -> OffsetDateTime {
		instant.saturating_add(Duration::milliseconds((minutes * 60_000.) as i64))
	}
}

/// [`Clock`] backed by the system wall clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Controllable [`Clock`] that only moves when told to.
#[derive(Debug)]
pub struct FixedClock(Mutex<OffsetDateTime>);
impl FixedClock {
	/// Creates a clock frozen at `instant`.
	pub fn new(instant: OffsetDateTime) -> Self {
		Self(Mutex::new(instant))
	}

	/// Moves the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}

	/// Moves the clock forward (or backward, for negative values) by `delta`.
	pub fn advance(&self, delta: Duration) {
		let mut now = self.0.lock();

		*now = now.saturating_add(delta);
	}
}
impl Clock for FixedClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

fn unix_millis(instant: OffsetDateTime) -> i64 {
	(instant.unix_timestamp_nanos() / 1_000_000) as i64
}
