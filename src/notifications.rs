// ABOUTME: Toast-style notifications raised by pages after saves
// ABOUTME: Success and error entries with a title and optional description
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use serde::Serialize;
use std::collections::VecDeque;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something worked
    Success,
    /// Something failed
    Error,
}

/// One message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Headline, e.g. "Recipe created"
    pub title: String,
    /// Extra detail, e.g. the backend's error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    /// Success with a title only
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    /// Error with a description
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

/// Pending notifications, oldest first
///
/// At most [`Notifications::MAX_PENDING`] are kept; pushing past that drops
/// the oldest.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    /// Notifications kept before the oldest is dropped
    pub const MAX_PENDING: usize = 5;

    /// Queue a notification
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(kind = ?notification.kind, title = %notification.title, "Notification raised");
        if self.queue.len() >= Self::MAX_PENDING {
            self.queue.pop_front();
        }
        self.queue.push_back(notification);
    }

    /// Most recent notification
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    /// Take everything queued
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    /// Number queued
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
