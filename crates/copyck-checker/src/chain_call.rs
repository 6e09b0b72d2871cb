//! Explicit constructor calls (`super(..)` / `this(..)`).

use copyck_model::{CallKind, ConstructorId, Expression, ReferenceResolver};

use crate::context::CheckerContext;

/// The constructor invoked by the first statement of `constructor`'s body.
///
/// Only statement 0 is inspected; its primary expression must be an
/// invocation whose callee resolves to a constructor. Instance creation
/// (`new T(..)`) never counts, and neither do calls in later statements.
pub fn find_explicit_constructor_call(
    ctx: &CheckerContext<'_>,
    constructor: ConstructorId,
) -> Option<ConstructorId> {
    let first = *ctx.arena.constructor(constructor)?.body.first()?;
    let expr = ctx.arena.stmt(first)?.kind.primary_expression()?;
    let Expression::Call {
        kind: CallKind::Invocation,
        callee,
        ..
    } = &ctx.arena.expr(expr)?.kind
    else {
        return None;
    };
    ctx.resolver.resolve(*callee)?.as_constructor()
}
