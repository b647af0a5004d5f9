//! Reporting boundary for configuration problems.
//!
//! The catalog never decides the host's error policy. When it meets an
//! unknown rule, an unsupported mode or pathological nesting it hands a
//! message and a [`Severity`] to a [`Reporter`]; the host decides whether
//! that logs, counts or aborts.

use std::fmt;
use std::sync::Mutex;

/// Severity of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Recoverable; the operation failed closed or continued.
    Warning,
    /// A configuration defect.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Capability to report a problem to the host.
pub trait Reporter: Send + Sync {
    /// Reports `message` with the given severity.
    fn report(&self, message: &str, severity: Severity);
}

/// Default reporter: emits `tracing` events.
///
/// Warnings go to `tracing::warn!`, errors to `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Warning => tracing::warn!(severity = %severity, "{}", message),
            Severity::Error => tracing::error!(severity = %severity, "{}", message),
        }
    }
}

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The reported message
    pub message: String,
    /// The reported severity
    pub severity: Severity,
}

/// In-memory reporter that records every report.
///
/// Useful in tests and for hosts that batch problems per request.
///
/// # Examples
///
/// ```
/// use input_cage::{RecordingReporter, Reporter, Severity};
///
/// let reporter = RecordingReporter::new();
/// reporter.report("mode 2 is not implemented", Severity::Warning);
///
/// assert_eq!(reporter.len(), 1);
/// assert_eq!(reporter.reports()[0].severity, Severity::Warning);
/// ```
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded reports, oldest first.
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    /// Returns the number of recorded reports.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns how many reports carry the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|report| report.severity == severity)
            .count()
    }

    /// Clears all recorded reports.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str, severity: Severity) {
        self.lock().push(Report {
            message: message.to_string(),
            severity,
        });
    }
}
