//! Advisory diagnostics for coercion failures.
//!
//! A diagnostic never changes the shape of a parse result: the offending
//! option is left unset and a message is reported. The sink is injected so
//! callers and tests can capture messages deterministically; when none is
//! supplied, messages go to `tracing`.

use std::fmt;
use std::sync::Mutex;

/// A single advisory message produced during option coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A valued directive named a label missing from the option's enum map.
    InvalidEnumValue {
        option: String,
        value: String,
        allowed: Vec<String>,
    },
    /// A descriptor carried an element type the coercer does not know.
    UnknownPrimitiveType { primitive: String, value: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidEnumValue {
                option,
                value,
                allowed,
            } => write!(
                f,
                "Invalid value {} for {}. Allowed values: {}",
                value,
                option,
                allowed.join(",")
            ),
            Diagnostic::UnknownPrimitiveType { primitive, value } => {
                write!(f, "Unknown primitive type {} with - {}", primitive, value)
            }
        }
    }
}

/// Receiver for advisory diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Default sink: one `warn` event per diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}

/// Sink that buffers diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.collected.lock().unwrap())
    }

    pub fn is_empty(&self) -> bool {
        self.collected.lock().unwrap().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.collected.lock().unwrap().push(diagnostic);
    }
}
