use crate::models::NotificationView;
use std::time::{Duration, Instant};

/// How long a banner stays up before auto-dismiss.
pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    created_at: Instant,
}

impl Notification {
    pub fn view(&self) -> NotificationView {
        NotificationView {
            id: self.id,
            message: self.message.clone(),
            severity: self.severity.as_str().to_string(),
        }
    }
}

/// Stack of short-lived banners. Notifications pile up in insertion order with
/// no dedup or queueing; expiry is evaluated whenever the stack is read.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NotificationView {
        self.push_at(Instant::now(), message, severity)
    }

    pub fn push_at(
        &mut self,
        now: Instant,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationView {
        self.next_id += 1;
        let item = Notification {
            id: self.next_id,
            message: message.into(),
            severity,
            created_at: now,
        };
        let view = item.view();
        self.items.push(item);
        view
    }

    /// Manual dismiss. Unknown ids are ignored, the banner may already have
    /// aged out.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    /// Drops anything past its lifetime and returns what is still showing.
    pub fn active(&mut self) -> Vec<NotificationView> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&mut self, now: Instant) -> Vec<NotificationView> {
        self.items
            .retain(|item| now.duration_since(item.created_at) < DISMISS_AFTER);
        self.items.iter().map(Notification::view).collect()
    }
}
