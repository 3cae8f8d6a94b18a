use std::fmt::{self, Display};

use crate::config::defaults::Defaults;

/// A fully resolved notification. Only [`PendingRequest::resolve`] builds one, so every field
/// always carries either the supplied value or its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    application: String,
    summary: String,
    body: String,
    icon: String,
    timeout_millis: i32,
}
impl NotificationRequest {
    pub fn application(&self) -> &str {
        &self.application
    }
    pub fn summary(&self) -> &str {
        &self.summary
    }
    pub fn body(&self) -> &str {
        &self.body
    }
    pub fn icon(&self) -> &str {
        &self.icon
    }
    pub fn timeout_millis(&self) -> i32 {
        self.timeout_millis
    }
}

/// Raw values as they were collected from argv. `None` means the flag never appeared.
#[derive(Debug, Clone, Default)]
pub struct PendingRequest {
    pub application: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub timeout: Option<String>,
}
impl PendingRequest {
    pub fn resolve(self, defaults: &Defaults) -> NotificationRequest {
        let timeout_millis = match self.timeout.as_deref() {
            Some(raw) => raw.trim().parse::<i32>().unwrap_or_else(|_| {
                tracing::debug!(value = raw, "timeout is not an integer, using default");
                defaults.timeout_millis
            }),
            None => defaults.timeout_millis,
        };

        NotificationRequest {
            application: self
                .application
                .unwrap_or_else(|| defaults.application.clone()),
            summary: self.summary.unwrap_or_else(|| defaults.summary.clone()),
            body: self.body.unwrap_or_else(|| defaults.body.clone()),
            icon: self.icon.unwrap_or_else(|| defaults.icon.clone()),
            timeout_millis,
        }
    }
}

/// Identifier the notification service hands back for a shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle(u32);
impl NotificationHandle {
    pub fn id(self) -> u32 {
        self.0
    }
}
impl From<u32> for NotificationHandle {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
impl Display for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
