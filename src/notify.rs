use log::{error, info, warn};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Icon classes used by the toast header
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "bi-check-circle-fill text-success",
            Severity::Error => "bi-exclamation-triangle-fill text-danger",
            Severity::Warning => "bi-exclamation-circle-fill text-warning",
            Severity::Info => "bi-info-circle-fill text-info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A transient, auto-dismissing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.message)
    }
}

/// Pending toasts, oldest first
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let toast = Toast {
            severity,
            message: message.into(),
        };
        match severity {
            Severity::Error => error!("{}", toast.message),
            Severity::Warning => warn!("{}", toast.message),
            Severity::Success | Severity::Info => info!("{}", toast.message),
        }
        self.queue.push_back(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn last(&self) -> Option<&Toast> {
        self.queue.back()
    }

    /// Hands every queued toast to the caller
    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }
}
