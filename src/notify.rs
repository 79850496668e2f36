// File: ./src/notify.rs
// Transient fire-and-forget notifications for the footer status line.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Every notification lives for exactly this long, then disappears.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub kind: Kind,
    expires_at: Instant,
}

/// Queue of pending notifications. Callers pass the current instant into
/// `push`/`prune` so tests can drive the clock without sleeping.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.push(text.into(), Kind::Success, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.push(text.into(), Kind::Error, now);
    }

    fn push(&mut self, text: String, kind: Kind, now: Instant) {
        self.queue.push_back(Notification {
            text,
            kind,
            expires_at: now + TOAST_TTL,
        });
    }

    /// Drop everything that has outlived its TTL.
    pub fn prune(&mut self, now: Instant) {
        self.queue.retain(|n| n.expires_at > now);
    }

    /// The most recent notification still alive, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_expires_after_ttl() {
        let mut notifier = Notifier::new();
        let t0 = Instant::now();
        notifier.success("Task added.", t0);
        assert_eq!(notifier.latest().map(|n| n.text.as_str()), Some("Task added."));

        // One tick before expiry it is still visible.
        notifier.prune(t0 + TOAST_TTL - Duration::from_millis(1));
        assert!(!notifier.is_empty());

        // At expiry it is gone.
        notifier.prune(t0 + TOAST_TTL);
        assert!(notifier.is_empty());
        assert!(notifier.latest().is_none());
    }

    #[test]
    fn latest_wins_without_discarding_older_entries() {
        let mut notifier = Notifier::new();
        let t0 = Instant::now();
        notifier.success("Task added.", t0);
        notifier.error("No task selected.", t0 + Duration::from_secs(1));

        assert_eq!(notifier.latest().map(|n| n.kind), Some(Kind::Error));

        // Once the newer one expires the older one would be gone too;
        // prune strictly by per-entry deadline.
        notifier.prune(t0 + TOAST_TTL);
        assert_eq!(notifier.latest().map(|n| n.kind), Some(Kind::Error));
    }
}
