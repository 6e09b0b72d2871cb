//! Copy-constructor inspections.
//!
//! This crate is organized into several modules:
//! - `classifier` - copy-constructor detection
//! - `field_catalog` - fields a copy constructor is expected to copy
//! - `chain_call` - the constructor explicitly invoked by a body's first statement
//! - `provenance` - does an expression read field F off instance I
//! - `completeness` - missing and suspicious field copies
//! - `superclass_chain` - chaining to the superclass copy constructor
//! - `synthesizer` - copy-constructor source generation
//! - `state` - `CheckerState`, the driver that runs the inspections
//!
//! The checker is a pure function of the program model: it reads a
//! `NodeArena` (plus an optional injected `ReferenceResolver`) and reports
//! advisory diagnostics into a `DiagnosticSink`. It never fails.

pub mod chain_call;
pub mod classifier;
pub mod completeness;
pub mod context;
pub mod field_catalog;
pub mod provenance;
pub mod sink;
pub mod state;
pub mod superclass_chain;
pub mod synthesizer;

pub use context::{CancellationToken, CheckerContext, CheckerOptions};
pub use sink::DiagnosticSink;
pub use state::CheckerState;

pub mod diagnostics {
    pub use copyck_common::diagnostics::*;
}
