//! Transient notifications.
//!
//! Every recoverable failure in the console degrades to a toast: a short
//! message shown for a few seconds and then swept away. Success paths
//! use the same queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Cap on queued toasts so a burst of failures cannot grow unbounded.
const MAX_TOASTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    created: Instant,
}

impl Toast {
    fn new(level: ToastLevel, title: &str, message: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.to_string(),
            created: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

/// FIFO queue of live toasts.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, title: &str, message: &str) {
        self.push(Toast::new(ToastLevel::Success, title, message));
    }

    pub fn error(&mut self, title: &str, message: &str) {
        self.push(Toast::new(ToastLevel::Error, title, message));
    }

    pub fn info(&mut self, title: &str, message: &str) {
        self.push(Toast::new(ToastLevel::Info, title, message));
    }

    fn push(&mut self, toast: Toast) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
    }

    /// Drop expired toasts. Called once per render tick.
    pub fn sweep(&mut self) {
        self.toasts.retain(|t| t.age() < TOAST_TTL);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut queue = ToastQueue::new();
        queue.success("Success", "Unit created successfully");
        queue.error("Error", "Failed to load units");
        assert_eq!(queue.len(), 2);
        let levels: Vec<ToastLevel> = queue.visible().map(|t| t.level).collect();
        assert_eq!(levels, [ToastLevel::Success, ToastLevel::Error]);
    }

    #[test]
    fn test_queue_is_capped() {
        let mut queue = ToastQueue::new();
        for i in 0..20 {
            queue.info("Info", &format!("message {i}"));
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        // Oldest entries were dropped first.
        assert_eq!(queue.visible().next().unwrap().message, "message 12");
    }

    #[test]
    fn test_sweep_keeps_fresh_toasts() {
        let mut queue = ToastQueue::new();
        queue.info("Info", "fresh");
        queue.sweep();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_sweep_drops_expired_toasts() {
        let mut queue = ToastQueue::new();
        queue.info("Info", "fresh");
        queue.toasts.push_back(Toast {
            level: ToastLevel::Info,
            title: "Info".to_string(),
            message: "stale".to_string(),
            created: Instant::now()
                .checked_sub(TOAST_TTL + Duration::from_secs(1))
                .expect("process uptime exceeds the toast TTL"),
        });
        assert_eq!(queue.len(), 2);

        queue.sweep();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible().next().unwrap().message, "fresh");
    }
}
