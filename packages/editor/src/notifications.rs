//! Operator-facing notifications ("toasts").

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue; the oldest notification is dropped when full
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    capacity: usize,
}

impl Notifications {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Error => tracing::warn!(%message, "operator notified of failure"),
            _ => tracing::debug!(%message, ?level, "notification"),
        }

        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Notification {
            level,
            message,
            created_at: Utc::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(20)
    }
}
