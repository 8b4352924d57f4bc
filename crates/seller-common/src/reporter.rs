//! Error reporting with an explicit queue.
//!
//! Components that surface failures receive a [`ReporterHandle`] at
//! construction time. Handles push [`ErrorReport`]s into a channel and never
//! block. The owning [`ErrorReporter`] drains the channel into a queue and
//! delivers batches to a [`ReportSink`] while online; a failed delivery puts
//! the batch back at the front of the queue for the next flush.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use seller_model::{ImportError, ReportCategory, Severity};

/// Where and when a report originated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorContext {
    pub component: Option<String>,
    pub action: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    pub fn now() -> Self {
        Self {
            component: None,
            action: None,
            timestamp: Utc::now(),
        }
    }
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub context: ErrorContext,
    pub severity: Severity,
    pub category: ReportCategory,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, severity: Severity, category: ReportCategory) -> Self {
        Self {
            message: message.into(),
            context: ErrorContext::now(),
            severity,
            category,
        }
    }

    /// Field-level validation failure.
    pub fn validation(message: impl Into<String>, field: &str, component: &str) -> Self {
        Self::new(message, Severity::Medium, ReportCategory::Validation)
            .with_component(component)
            .with_action(format!("validation:{field}"))
    }

    /// Security finding; always critical.
    pub fn security(message: impl Into<String>, component: &str, action: &str) -> Self {
        Self::new(message, Severity::Critical, ReportCategory::Security)
            .with_component(component)
            .with_action(action)
    }

    /// Report for an import failure, with severity and category taken from its kind.
    pub fn from_import_error(err: &ImportError, component: &str) -> Self {
        let kind = err.kind();
        Self::new(err.to_string(), kind.severity(), kind.category()).with_component(component)
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.context.component = Some(component.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.context.action = Some(action.into());
        self
    }
}

/// Delivery failure reported by a sink.
#[derive(Debug, Error)]
#[error("report delivery failed: {0}")]
pub struct SinkError(pub String);

/// Destination for flushed reports.
pub trait ReportSink {
    fn deliver(&mut self, batch: &[ErrorReport]) -> Result<(), SinkError>;
}

/// Sink that writes every report as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn deliver(&mut self, batch: &[ErrorReport]) -> Result<(), SinkError> {
        for report in batch {
            let component = report.context.component.as_deref().unwrap_or("-");
            let action = report.context.action.as_deref().unwrap_or("-");
            if report.severity >= Severity::High {
                error!(
                    severity = report.severity.label(),
                    category = report.category.label(),
                    component,
                    action,
                    "{}",
                    report.message
                );
            } else {
                warn!(
                    severity = report.severity.label(),
                    category = report.category.label(),
                    component,
                    action,
                    "{}",
                    report.message
                );
            }
        }
        Ok(())
    }
}

/// Cloneable sending side handed to components.
#[derive(Debug, Clone)]
pub struct ReporterHandle {
    tx: Sender<ErrorReport>,
}

impl ReporterHandle {
    pub fn report(&self, report: ErrorReport) {
        if self.tx.send(report).is_err() {
            debug!("error reporter is gone; report discarded");
        }
    }
}

/// Owns the queue and the sink.
pub struct ErrorReporter<S> {
    tx: Sender<ErrorReport>,
    rx: Receiver<ErrorReport>,
    queue: VecDeque<ErrorReport>,
    notifications: Vec<String>,
    online: bool,
    sink: S,
}

impl<S: ReportSink> ErrorReporter<S> {
    /// Creates an online reporter and its first handle.
    pub fn new(sink: S) -> (Self, ReporterHandle) {
        let (tx, rx) = mpsc::channel();
        let handle = ReporterHandle { tx: tx.clone() };
        let reporter = Self {
            tx,
            rx,
            queue: VecDeque::new(),
            notifications: Vec::new(),
            online: true,
            sink,
        };
        (reporter, handle)
    }

    /// Another handle to the same queue.
    pub fn handle(&self) -> ReporterHandle {
        ReporterHandle {
            tx: self.tx.clone(),
        }
    }

    /// Moves reports from the channel to the queue and flushes when online.
    ///
    /// Returns the number of reports delivered.
    pub fn pump(&mut self) -> usize {
        while let Ok(report) = self.rx.try_recv() {
            debug!(
                severity = report.severity.label(),
                category = report.category.label(),
                "queued error report: {}",
                report.message
            );
            if report.severity == Severity::Critical {
                self.notifications
                    .push(report.category.user_message().to_string());
            }
            self.queue.push_back(report);
        }
        if !self.online {
            return 0;
        }
        self.flush().unwrap_or(0)
    }

    /// Delivers the queued reports as one batch.
    ///
    /// On failure the batch goes back to the front of the queue.
    pub fn flush(&mut self) -> Result<usize, SinkError> {
        if self.queue.is_empty() || !self.online {
            return Ok(0);
        }
        let batch: Vec<ErrorReport> = self.queue.drain(..).collect();
        match self.sink.deliver(&batch) {
            Ok(()) => Ok(batch.len()),
            Err(err) => {
                warn!(pending = batch.len(), "failed to send error reports: {err}");
                for report in batch.into_iter().rev() {
                    self.queue.push_front(report);
                }
                Err(err)
            }
        }
    }

    /// Marks the sink reachable or not; going online drains and flushes.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        if online {
            self.pump();
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Reports waiting for delivery.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// User-facing messages raised by critical reports since the last call.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
