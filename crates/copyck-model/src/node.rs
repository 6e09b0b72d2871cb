//! Node data stored in the [`NodeArena`](crate::NodeArena).
//!
//! Declarations (`ClassData`, `FieldData`, ...) are plain records that point
//! at each other through typed indices. Constructor bodies are trees of
//! [`Statement`]s over [`Expression`]s; both enums are closed, so every
//! consumer matches them exhaustively.

use copyck_common::Span;
use smallvec::SmallVec;

use crate::base::{
    ClassId, ConstructorId, ExprId, FieldId, FileId, LocalId, MethodId, ParameterId, RefId, StmtId,
};

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug)]
pub struct ClassData {
    pub file: FileId,
    pub name: String,
    /// Fully qualified name (`geo.Point`), or the simple name for classes in
    /// the default package.
    pub qualified_name: String,
    /// Superclass name as written in the source. Resolved by lookup through
    /// [`NodeArena::superclass_of`](crate::NodeArena::superclass_of); the
    /// class never owns its superclass.
    pub superclass_name: Option<String>,
    pub fields: Vec<FieldId>,
    pub constructors: Vec<ConstructorId>,
    pub methods: Vec<MethodId>,
    pub name_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct FieldData {
    pub class: ClassId,
    pub name: String,
    /// Declared type, canonical text.
    pub ty: String,
    pub is_static: bool,
    pub is_final: bool,
    pub has_initializer: bool,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ConstructorData {
    /// `None` for a detached constructor that has no containing class.
    pub class: Option<ClassId>,
    pub parameters: SmallVec<[ParameterId; 2]>,
    pub body: Vec<StmtId>,
    pub name_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub constructor: ConstructorId,
    pub name: String,
    /// Declared type, canonical text.
    pub ty: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct LocalData {
    pub constructor: ConstructorId,
    pub name: String,
    pub ty: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct MethodData {
    pub class: ClassId,
    pub name: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub name: String,
}

// =============================================================================
// Expressions
// =============================================================================

/// Expression shapes the checker understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// A possibly qualified name reference (`x`, `this.x`, `other.x`).
    /// The reference may resolve to a field, a parameter or a local.
    FieldAccess {
        qualifier: Option<ExprId>,
        reference: RefId,
    },
    This,
    /// Method call (`receiver.callee(args)`), free call (`callee(args)`),
    /// explicit constructor call (`super(args)`, `this(args)`) or instance
    /// creation (`new T(args)`).
    Call {
        kind: CallKind,
        receiver: Option<ExprId>,
        callee: RefId,
        arguments: Vec<ExprId>,
    },
    /// Binary and n-ary operators, including string concatenation.
    Polyadic {
        operator: String,
        operands: Vec<ExprId>,
    },
    Conditional {
        condition: ExprId,
        when_true: ExprId,
        when_false: ExprId,
    },
    Parenthesized {
        inner: ExprId,
    },
    /// Literals, `super`, lambdas and everything else.
    Other {
        text: Option<String>,
    },
}

/// Distinguishes invocations from instance creation. Explicit constructor
/// calls (`super(..)`, `this(..)`) are invocations whose callee resolves to a
/// constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    Invocation,
    New,
}

#[derive(Clone, Debug)]
pub struct ExprNode {
    pub kind: Expression,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Assignment {
        lhs: ExprId,
        rhs: Option<ExprId>,
    },
    Expression(ExprId),
    Block(Vec<StmtId>),
    If {
        condition: ExprId,
        then_branch: Vec<StmtId>,
        else_branch: Option<Vec<StmtId>>,
    },
    Loop {
        condition: Option<ExprId>,
        body: Vec<StmtId>,
    },
    Local {
        local: LocalId,
        initializer: Option<ExprId>,
    },
    Other,
}

impl Statement {
    /// The expression a statement is built around, if any.
    ///
    /// For `super(other);` this is the call; for an assignment it is `None`
    /// because the assignment itself is the statement's primary form.
    #[must_use]
    pub const fn primary_expression(&self) -> Option<ExprId> {
        match self {
            Statement::Expression(expr) => Some(*expr),
            _ => None,
        }
    }

    /// Directly nested statements, in source order.
    pub fn children(&self) -> impl Iterator<Item = StmtId> + '_ {
        let (first, second): (&[StmtId], &[StmtId]) = match self {
            Statement::Block(stmts) => (stmts, &[]),
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => (then_branch, else_branch.as_deref().unwrap_or(&[])),
            Statement::Loop { body, .. } => (body, &[]),
            Statement::Assignment { .. }
            | Statement::Expression(_)
            | Statement::Local { .. }
            | Statement::Other => (&[], &[]),
        };
        first.iter().chain(second.iter()).copied()
    }
}

#[derive(Clone, Debug)]
pub struct StmtNode {
    pub kind: Statement,
    pub span: Span,
}
