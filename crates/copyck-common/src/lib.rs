//! Common types and utilities for the copyck copy-constructor checker.
//!
//! This crate provides foundational types used across all copyck crates:
//! - Source spans (`Span`)
//! - Diagnostics, categories and the diagnostic message table
//! - Recursion limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostic types and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Centralized limits and thresholds
pub mod limits;
