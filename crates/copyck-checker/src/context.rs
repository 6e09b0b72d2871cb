//! Shared, read-only state for one checker pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use copyck_model::{ConstructorId, NodeArena, ReferenceResolver};

/// Which inspections run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Report copy constructors that miss fields or copy from the wrong field.
    pub check_completeness: bool,
    /// Report copy constructors that do not chain to the superclass copy
    /// constructor.
    pub check_superclass_chain: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            check_completeness: true,
            check_superclass_chain: true,
        }
    }
}

/// Cooperative cancellation flag, checked before each constructor.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The program snapshot plus the capabilities the inspections need.
#[derive(Clone, Copy)]
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub resolver: &'a (dyn ReferenceResolver + Sync),
}

impl<'a> CheckerContext<'a> {
    /// Resolve references through the arena's own table.
    pub fn new(arena: &'a NodeArena) -> Self {
        CheckerContext {
            arena,
            resolver: arena,
        }
    }

    /// Resolve references through a host-provided resolver.
    pub fn with_resolver(
        arena: &'a NodeArena,
        resolver: &'a (dyn ReferenceResolver + Sync),
    ) -> Self {
        CheckerContext { arena, resolver }
    }

    /// File name diagnostics for `constructor` are attached to.
    pub fn file_of(&self, constructor: ConstructorId) -> &'a str {
        self.arena
            .constructor_file(constructor)
            .map_or("", |file| self.arena.file_name(file))
    }
}
