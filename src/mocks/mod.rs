//! Test doubles for the transport, clock and notifier collaborators.

pub mod mock_transport;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::notify::{Notifier, ToastKind};
use crate::storage::Clock;

pub use mock_transport::{MockTransport, RecordedRequest};

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Notifier that keeps every toast for inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(String, ToastKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<(String, ToastKind)> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn show_toast(&self, message: &str, kind: ToastKind) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), kind));
    }
}
