//! Toast notification channel.
//!
//! A single-slot mailbox: a new notification replaces the visible one, and a
//! toast disappears after its display duration or on explicit dismissal,
//! whichever comes first. Expiry is evaluated against wall-clock time when
//! the slot is read, so there is no timer to cancel.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Default auto-dismiss duration in seconds
pub const DEFAULT_DISMISS_SECONDS: i64 = 5;

/// Notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Informational message
    Info,
    /// Something the user tried did not fully work
    Warning,
}

impl NotificationLevel {
    /// Get icon/prefix for this level
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Warning => "⚠",
        }
    }
}

/// Recovery action a toast can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastAction {
    /// Restore the default filter
    ResetFilters,
}

impl ToastAction {
    /// Button label for this action
    pub fn label(&self) -> &'static str {
        match self {
            ToastAction::ResetFilters => "Reset filters",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    /// Unique ID for this toast
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ToastAction>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    /// Check if this toast has outlived its display duration at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Human-readable one-liner, with the action hint if any
    pub fn display(&self) -> String {
        match self.action {
            Some(action) => format!("{} {} [{}]", self.level.icon(), self.message, action.label()),
            None => format!("{} {}", self.level.icon(), self.message),
        }
    }
}

/// Single-slot notification channel
#[derive(Debug)]
pub struct NotificationChannel {
    slot: Option<Toast>,
    next_id: u64,
    duration: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_duration(Duration::seconds(DEFAULT_DISMISS_SECONDS))
    }

    /// Channel with a custom display duration
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: None,
            next_id: 1,
            duration,
        }
    }

    /// Show an informational toast, replacing whatever is visible.
    pub fn notify(&mut self, message: impl Into<String>, action: Option<ToastAction>) -> &Toast {
        self.push(NotificationLevel::Info, message.into(), action)
    }

    /// Show a warning toast, replacing whatever is visible.
    pub fn warn(&mut self, message: impl Into<String>) -> &Toast {
        self.push(NotificationLevel::Warning, message.into(), None)
    }

    fn push(&mut self, level: NotificationLevel, message: String, action: Option<ToastAction>) -> &Toast {
        let now = Utc::now();
        let toast = Toast {
            id: self.next_id,
            level,
            message,
            action,
            created_at: now,
            expires_at: now + self.duration,
        };
        self.next_id += 1;

        if let Some(replaced) = &self.slot {
            tracing::trace!(id = replaced.id, "toast replaced before dismissal");
        }
        tracing::debug!(id = toast.id, message = %toast.message, "toast");
        self.slot.insert(toast)
    }

    /// Clear the slot immediately.
    pub fn dismiss(&mut self) {
        self.slot = None;
    }

    /// The visible toast, if any.
    pub fn current(&self) -> Option<&Toast> {
        self.current_at(Utc::now())
    }

    /// The toast visible at `now`, if any.
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.slot.as_ref().filter(|t| !t.is_expired_at(now))
    }

    /// Drop the toast if it has expired.
    pub fn cleanup(&mut self) {
        if self.current().is_none() {
            self.slot = None;
        }
    }

    /// Take the action bound to the visible toast, dismissing it.
    pub fn take_action(&mut self) -> Option<ToastAction> {
        let action = self.current().and_then(|t| t.action);
        if action.is_some() {
            self.dismiss();
        }
        action
    }
}
