//! Import failure taxonomy.
//!
//! Every failure surfaced by the import pipeline carries the stage that
//! produced it ([`ErrorKind`]). The kind decides how loudly the failure is
//! reported: security findings are escalated above ordinary validation
//! failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Report severity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Area an error report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Ui,
    Api,
    Validation,
    Security,
    Performance,
}

impl ReportCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Api => "api",
            Self::Validation => "validation",
            Self::Security => "security",
            Self::Performance => "performance",
        }
    }

    /// Message shown to the user when a critical report lands in this category.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Ui => "Something went wrong with the interface. Please refresh the page.",
            Self::Api => "Unable to connect to our servers. Please check your internet connection.",
            Self::Validation => "The data you entered is invalid. Please check and try again.",
            Self::Security => "A security issue was detected. Please contact support.",
            Self::Performance => {
                "The application is running slowly. Some features may be limited."
            }
        }
    }
}

/// Pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Size, extension or file name rejected.
    File,
    /// Empty, oversized, or missing required columns.
    Content,
    /// Field-level rule violation.
    Validation,
    /// Required field missing during schema transformation.
    Transformation,
    /// Malicious pattern detected in the content.
    Security,
}

impl ErrorKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::Security => Severity::Critical,
            Self::File | Self::Content => Severity::High,
            Self::Validation | Self::Transformation => Severity::Medium,
        }
    }

    pub fn category(self) -> ReportCategory {
        match self {
            Self::Security => ReportCategory::Security,
            _ => ReportCategory::Validation,
        }
    }
}

/// A failure that stopped or degraded an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("file rejected: {}", .messages.join("; "))]
    File { messages: Vec<String> },

    #[error("content rejected: {}", .messages.join("; "))]
    Content { messages: Vec<String> },

    #[error("malicious content detected: {}", .messages.join("; "))]
    Security { messages: Vec<String> },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Transformation { message: String },
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::File { .. } => ErrorKind::File,
            Self::Content { .. } => ErrorKind::Content,
            Self::Security { .. } => ErrorKind::Security,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Transformation { .. } => ErrorKind::Transformation,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }

    /// Individual messages, in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::File { messages } | Self::Content { messages } | Self::Security { messages } => {
                messages.clone()
            }
            Self::Validation { message, .. } | Self::Transformation { message } => {
                vec![message.clone()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_outranks_validation() {
        assert_eq!(ErrorKind::Security.severity(), Severity::Critical);
        assert!(ErrorKind::Security.severity() > ErrorKind::Validation.severity());
        assert_eq!(ErrorKind::Security.category(), ReportCategory::Security);
    }

    #[test]
    fn import_error_display() {
        let err = ImportError::File {
            messages: vec!["too big".to_string(), "bad name".to_string()],
        };
        assert_eq!(err.to_string(), "file rejected: too big; bad name");
        assert_eq!(err.kind(), ErrorKind::File);
        assert_eq!(err.messages().len(), 2);
    }
}
