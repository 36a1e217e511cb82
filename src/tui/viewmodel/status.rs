//! Transient status messages shown in the footer.

use std::time::{Duration, Instant};

/// A footer notice that may expire on its own.
///
/// Used for short notices such as "Reloaded layout.json" or "No earlier
/// view to go back to". With no expiry set, a message stays until the next
/// key press clears it.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    set_at: Option<Instant>,
    expire_after: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages expire `duration` after being set.
    #[must_use]
    pub const fn with_expiry(duration: Duration) -> Self {
        Self {
            message: None,
            set_at: None,
            expire_after: Some(duration),
        }
    }

    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.set_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// Current message, dropping it first if it has expired.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(expiry)) = (self.set_at, self.expire_after)
            && set_at.elapsed() >= expiry
        {
            self.clear();
        }
        self.message.as_deref()
    }

    /// Current message without checking expiry.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }
}
