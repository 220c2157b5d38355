//! Non-fatal diagnostics recorded by chained builders

/// A failure that was logged and skipped instead of being returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Operation that was skipped (e.g. "add_column")
    pub operation: String,
    /// Human readable reason
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)
    }
}
