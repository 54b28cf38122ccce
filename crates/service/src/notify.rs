//! User-facing notices.
//!
//! The presentation layer plugs a [`Notifier`] into the record store to show
//! alerts. Faults never escape as panics; they arrive here as a short notice.

use std::sync::Mutex;

use tracing::{error, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, title: title.into(), message: message.into() }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, title: title.into(), message: message.into() }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default notifier: emits notices as tracing events under the `notice` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => error!(target: "notice", title = %notice.title, "{}", notice.message),
            Severity::Warning => warn!(target: "notice", title = %notice.title, "{}", notice.message),
        }
    }
}

/// Keeps notices in memory until drained, for UIs that poll after each call.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self { Self::default() }

    /// Take every notice received so far.
    pub fn drain(&self) -> Vec<Notice> {
        let mut guard = self.notices.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *guard)
    }

    pub fn len(&self) -> usize {
        self.notices.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(|p| p.into_inner()).push(notice);
    }
}
