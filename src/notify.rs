//! User-facing notifications
//!
//! Toasts are fire-and-forget: nothing waits on them and a notifier can't
//! fail a call.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        };
        f.write_str(name)
    }
}

pub trait Notifier: Send + Sync {
    fn show_toast(&self, message: &str, kind: ToastKind);
}

/// Routes toasts to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_toast(&self, message: &str, kind: ToastKind) {
        match kind {
            ToastKind::Error => log::error!("[toast:{}] {}", kind, message),
            ToastKind::Warning => log::warn!("[toast:{}] {}", kind, message),
            ToastKind::Success | ToastKind::Info => log::info!("[toast:{}] {}", kind, message),
        }
    }
}
