//! Diagnostic stream for non-fatal render setup problems.
//!
//! Configuration errors (zero motion samples, wrong context kind, degraded
//! bindings) never abort a render. They are logged through `log` and also
//! recorded here so the host can surface them after setup.

use std::fmt;

use parking_lot::Mutex;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Something was defaulted but the output is still as requested.
    Warning,
    /// A unit of work was skipped.
    Error,
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Thread-safe diagnostic sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it.
    pub fn warning(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.push(Severity::Warning, message);
    }

    /// Records an error and logs it.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.push(Severity::Error, message);
    }

    fn push(&self, severity: Severity, message: String) {
        self.entries.lock().push(Diagnostic { severity, message });
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.warning("first");
        diags.error("second");

        assert_eq!(diags.len(), 2);
        assert_eq!(diags.error_count(), 1);

        let snapshot = diags.snapshot();
        assert_eq!(snapshot[0].severity, Severity::Warning);
        assert_eq!(snapshot[1].to_string(), "error: second");
    }

    #[test]
    fn drain_empties_the_sink() {
        let diags = Diagnostics::new();
        diags.error("boom");
        assert_eq!(diags.drain().len(), 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let diags = Diagnostics::new();
        std::thread::scope(|s| {
            for i in 0..4 {
                let diags = &diags;
                s.spawn(move || diags.warning(format!("thread {i}")));
            }
        });
        assert_eq!(diags.len(), 4);
    }
}
