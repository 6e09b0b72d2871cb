//! Program model for the copyck checker.
//!
//! The checker never parses source code. It consumes an immutable snapshot
//! of classes, constructors and constructor bodies stored in a [`NodeArena`]:
//! - `base` - typed indices into the arena and resolved `Declaration`s
//! - `node` - node data (`ClassData`, `FieldData`, `Expression`, `Statement`, ...)
//! - `node_arena` - the arena itself plus hierarchy lookups
//! - `printer` - source-like rendering of expressions
//! - `source` / `binder` - JSON program sources and the binder that lowers
//!   them into an arena with resolved references
//!
//! Reference resolution is exposed through the [`ReferenceResolver`] trait so
//! the checker can run against any host that can answer "what does this
//! name refer to".

pub mod base;
pub use base::{
    ClassId, ConstructorId, Declaration, ExprId, FieldId, FileId, LocalId, MethodId, ParameterId,
    RefId, StmtId,
};

pub mod node;
pub use node::{
    CallKind, ClassData, ConstructorData, ExprNode, Expression, FieldData, LocalData,
    MethodData, ParameterData, ReferenceData, Statement, StmtNode,
};

pub mod node_arena;
pub use node_arena::{NodeArena, ReferenceResolver};

pub mod printer;

pub mod source;
pub use source::ProgramSource;

pub mod binder;
pub use binder::{BindError, BinderState, bind_program};
