//! `CheckerState`: runs the enabled inspections over a program.
//!
//! Every constructor is analysed independently against the immutable
//! arena, so classes can be checked on a rayon pool. The parallel driver
//! merges per-class results back in class order and produces the same
//! diagnostics as the sequential one.

use copyck_common::Diagnostic;
use copyck_model::{ClassId, ConstructorId};
use rayon::prelude::*;
use tracing::{Level, debug, span};

use crate::completeness::CompletenessChecker;
use crate::context::{CancellationToken, CheckerContext, CheckerOptions};
use crate::sink::DiagnosticSink;
use crate::superclass_chain::check_superclass_chain;

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
    pub options: CheckerOptions,
    cancellation: Option<CancellationToken>,
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: CheckerContext<'a>, options: CheckerOptions) -> Self {
        CheckerState {
            ctx,
            options,
            cancellation: None,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Run every enabled inspection on one constructor.
    ///
    /// Completeness diagnostics come before the superclass-chain diagnostic
    /// for the same constructor.
    pub fn check_constructor(&self, constructor: ConstructorId, sink: &mut dyn DiagnosticSink) {
        if self.options.check_completeness {
            CompletenessChecker::new(self.ctx).check(constructor, sink);
        }
        if self.options.check_superclass_chain {
            check_superclass_chain(self.ctx, constructor, sink);
        }
    }

    /// Check every constructor of `class` in declaration order.
    ///
    /// Returns `false` if cancellation stopped the class part-way.
    pub fn check_class(&self, class: ClassId, sink: &mut dyn DiagnosticSink) -> bool {
        let Some(data) = self.ctx.arena.class(class) else {
            return true;
        };
        let _span = span!(Level::DEBUG, "check_class", class = %data.qualified_name).entered();
        for &constructor in &data.constructors {
            if self.is_cancelled() {
                debug!(class = %data.qualified_name, "cancelled");
                return false;
            }
            self.check_constructor(constructor, sink);
        }
        true
    }

    /// Check all classes sequentially. Returns `false` if cancelled.
    pub fn check_program(&self, sink: &mut dyn DiagnosticSink) -> bool {
        let _span = span!(
            Level::INFO,
            "check_program",
            classes = self.ctx.arena.class_count()
        )
        .entered();
        for class in self.ctx.arena.classes() {
            if !self.check_class(class, sink) {
                return false;
            }
        }
        true
    }

    /// Check all classes on the rayon pool, reporting into `sink` in class
    /// order. Returns `false` if cancelled; diagnostics produced before the
    /// cancellation are still reported.
    pub fn check_program_parallel(&self, sink: &mut dyn DiagnosticSink) -> bool {
        let _span = span!(
            Level::INFO,
            "check_program_parallel",
            classes = self.ctx.arena.class_count()
        )
        .entered();
        let classes: Vec<ClassId> = self.ctx.arena.classes().collect();
        let results: Vec<(bool, Vec<Diagnostic>)> = classes
            .par_iter()
            .map(|&class| {
                let mut diagnostics = Vec::new();
                let completed = self.check_class(class, &mut diagnostics);
                (completed, diagnostics)
            })
            .collect();

        let mut completed = true;
        for (class_completed, diagnostics) in results {
            for diagnostic in diagnostics {
                sink.report(diagnostic);
            }
            completed &= class_completed;
        }
        completed
    }

    /// Convenience wrapper collecting diagnostics into a `Vec`.
    pub fn collect_diagnostics(&self, parallel: bool) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if parallel {
            self.check_program_parallel(&mut diagnostics);
        } else {
            self.check_program(&mut diagnostics);
        }
        diagnostics
    }
}
