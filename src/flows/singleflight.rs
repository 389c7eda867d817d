//! In-flight de-duplication layered over [`AuthorizationService`].
//!
//! Callers that arrive while an exchange is running wait for it and reuse its token. A caller that
//! arrives after the exchange finished starts a new one, so nothing is cached across calls.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{_prelude::*, auth::AuthToken, flows::AuthorizationService};

/// [`AuthorizationService`] wrapper that collapses concurrent `get_token` calls into one exchange.
pub struct SingleflightAuthorizationService {
	inner: Arc<AuthorizationService>,
	flight: AsyncMutex<()>,
	completed: AtomicU64,
	last: Mutex<Option<AuthToken>>,
}
impl SingleflightAuthorizationService {
	/// Wraps `inner`.
	pub fn new(inner: Arc<AuthorizationService>) -> Self {
		Self {
			inner,
			flight: AsyncMutex::new(()),
			completed: AtomicU64::new(0),
			last: Mutex::new(None),
		}
	}

	/// Wrapped service.
	pub fn inner(&self) -> &Arc<AuthorizationService> {
		&self.inner
	}

	/// Returns the token of the exchange in flight when the call started, or performs a new one.
	///
	/// Failed exchanges are not shared: a waiter behind a failure runs its own exchange.
	pub async fn get_token(&self) -> Result<AuthToken> {
		let observed = self.completed.load(Ordering::Acquire);
		let _flight = self.flight.lock().await;

		if self.completed.load(Ordering::Acquire) != observed {
			let shared = self.last.lock().clone();

			if let Some(token) = shared {
				return Ok(token);
			}
		}

		let token = self.inner.get_token().await?;

		*self.last.lock() = Some(token.clone());
		self.completed.fetch_add(1, Ordering::AcqRel);

		Ok(token)
	}
}
impl Debug for SingleflightAuthorizationService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SingleflightAuthorizationService")
			.field("inner", &self.inner)
			.field("completed", &self.completed.load(Ordering::Relaxed))
			.finish()
	}
}
