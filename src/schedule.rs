//! Cancellation for periodic work on the single UI thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Returned by a repeating task's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskControl {
	/// Keep ticking.
	Continue,
	/// Stop and cancel the token.
	Break,
}

/// Shared flag; clones observe the same cancellation.
///
/// `Send + Sync` so it can be cancelled from a reactive cleanup hook.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	/// A fresh, uncancelled token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancel this token and every clone of it.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether any clone has been cancelled.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}

	/// Run one tick of `body` unless cancelled; a `Break` cancels the token.
	pub fn run_tick(&self, body: &mut impl FnMut() -> TaskControl) -> TaskControl {
		if self.is_cancelled() {
			return TaskControl::Break;
		}
		let control = body();
		if control == TaskControl::Break {
			self.cancel();
		}
		control
	}
}
