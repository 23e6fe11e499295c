//! User-facing alerts.
//!
//! The workflow never talks to a UI directly; it hands alerts to a
//! [`Notifier`], which a front end renders as toasts or dialogs.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

/// Sink for alerts shown to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, alert: Alert);

    fn success(&self, title: &str, message: &str) {
        self.notify(alert(AlertLevel::Success, title, message));
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(alert(AlertLevel::Error, title, message));
    }

    fn warning(&self, title: &str, message: &str) {
        self.notify(alert(AlertLevel::Warning, title, message));
    }

    fn info(&self, title: &str, message: &str) {
        self.notify(alert(AlertLevel::Info, title, message));
    }
}

fn alert(level: AlertLevel, title: &str, message: &str) -> Alert {
    Alert {
        level,
        title: title.to_string(),
        message: message.to_string(),
    }
}

/// Writes alerts to the log. Used by the command-line front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, alert: Alert) {
        let Alert {
            level,
            title,
            message,
        } = alert;
        match level {
            AlertLevel::Success | AlertLevel::Info => tracing::info!(%title, %message, "alert"),
            AlertLevel::Warning => tracing::warn!(%title, %message, "alert"),
            AlertLevel::Error => tracing::error!(%title, %message, "alert"),
        }
    }
}

/// Keeps every alert in memory.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    inner: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Alert> {
        self.inner.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Alert> {
        self.inner.lock().ok().and_then(|a| a.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: Alert) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.push(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_set_level() {
        let notifier = RecordingNotifier::new();
        notifier.success("ok", "done");
        notifier.warning("careful", "low stock");
        notifier.error("Error", "must select a client");

        let levels: Vec<_> = notifier.all().iter().map(|a| a.level).collect();
        assert_eq!(
            levels,
            vec![AlertLevel::Success, AlertLevel::Warning, AlertLevel::Error]
        );
        assert_eq!(notifier.last().unwrap().message, "must select a client");
    }

    #[test]
    fn tracing_notifier_accepts_every_level() {
        let notifier = TracingNotifier;
        notifier.info("info", "a");
        notifier.error("error", "b");
    }
}
