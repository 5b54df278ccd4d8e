//! User-visible notices — toast messages and navigation signals fanned out to
//! every connected host UI.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Something the host UI should show or do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// Error toast.
    Error { message: String },
    /// Success toast.
    Success { message: String },
    /// Leave the wizard and go to `to`.
    Navigate { to: String },
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn navigate(to: impl Into<String>) -> Self {
        Self::Navigate { to: to.into() }
    }
}

/// Broadcast fan-out of notices.
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Subscribe to notices. Each UI connection calls this.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a notice. Fine if nobody is listening.
    pub fn publish(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}
