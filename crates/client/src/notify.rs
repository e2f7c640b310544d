//! Transient user-visible notifications.

use mockall::automock;
use tracing::{info, warn};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation of a successful action
    Info,

    /// A failed action; local state is unchanged
    Error,
}

/// A short message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,

    /// Headline
    pub title: String,

    /// Detail line
    pub description: String,
}

impl Notice {
    /// Confirmation notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Failure notice.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where notices are delivered.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show `notice` to the shopper.
    fn notify(&self, notice: Notice);
}

/// Writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => info!(title = notice.title, "{}", notice.description),
            NoticeKind::Error => warn!(title = notice.title, "{}", notice.description),
        }
    }
}
