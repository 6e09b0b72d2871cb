//! Diagnostic types and message lookup for the copy-constructor checker.
//!
//! The message table lives in `data.rs`. Templates use `{0}`, `{1}`, ...
//! placeholders filled in by [`format_message`].

use serde::Serialize;

use crate::span::Span;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

/// Prefix rendered in front of numeric diagnostic codes (`CC1001`).
pub const CODE_PREFIX: &str = "CC";

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
///
/// The checker only ever produces `Advisory` findings. `Error` is reserved
/// for hosts that want to escalate them, and `Message` is used for
/// related-information entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Advisory = 0,
    Error = 1,
    Message = 2,
}

impl DiagnosticCategory {
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, DiagnosticCategory::Error)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Advisory => "advisory",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Related information for a diagnostic (e.g. the declaration of a field
/// that was never copied).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A checker finding attached to a source location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans (e.g. where a missing field was declared)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new advisory (non-blocking) diagnostic.
    #[must_use]
    pub fn advisory(file: impl Into<String>, span: Span, message: String, code: u32) -> Self {
        Self {
            file: file.into(),
            start: span.start,
            length: span.len(),
            message_text: message,
            category: DiagnosticCategory::Advisory,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(file: impl Into<String>, span: Span, message: String, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            ..Self::advisory(file, span, message, code)
        }
    }

    /// Build a diagnostic from the message table, filling in `args`.
    ///
    /// Falls back to the bare code when the table has no entry, which only
    /// happens if a caller passes a code that was never registered.
    #[must_use]
    pub fn from_code(file: impl Into<String>, span: Span, code: u32, args: &[&str]) -> Self {
        let (category, message) = match get_diagnostic_message(code) {
            Some(def) => (def.category, format_message(def.message, args)),
            None => (DiagnosticCategory::Advisory, format!("{CODE_PREFIX}{code}")),
        };
        Self {
            category,
            ..Self::advisory(file, span, message, code)
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: impl Into<String>, span: Span, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            start: span.start,
            length: span.len(),
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    /// Escalate the diagnostic to `Error` (hosts only; the checker never does).
    #[must_use]
    pub fn escalated(mut self) -> Self {
        self.category = DiagnosticCategory::Error;
        self
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}
