//! Expression provenance analysis.
//!
//! Decides, purely structurally, whether an expression "reads field F off
//! instance I". The instance is either the implicit receiver (`x`,
//! `this.x`) or a bound declaration such as the copy constructor's
//! parameter (`other.x`). Nothing is evaluated or type-checked; field
//! identity is declaration identity, so a shadowing field with the same
//! name never matches.
//!
//! Rules, by expression shape:
//! - `FieldAccess(q, r)`: `r` resolves to F and `q` selects I. Failing that,
//!   a qualifier that is itself a field access is searched
//!   (`other.x.y` reads `x` off `other`).
//! - `Parenthesized(e)`: `e` matches.
//! - `Conditional(c, t, e)`: `c` matches and (`t` or `e` matches).
//! - `Polyadic(ops)`: any operand matches.
//! - `Call`: with a receiver, only the receiver is searched
//!   (`other.x.clone()`); without one, any argument (`copyOf(other.x)`).
//! - `This`, `Other`: never.

use copyck_common::limits::MAX_EXPR_CHECK_DEPTH;
use copyck_model::{Declaration, ExprId, Expression, FieldId, RefId, ReferenceResolver};
use tracing::trace;

use crate::context::CheckerContext;

pub struct ProvenanceAnalyzer<'a> {
    ctx: CheckerContext<'a>,
}

impl<'a> ProvenanceAnalyzer<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        ProvenanceAnalyzer { ctx }
    }

    /// `instance == None` means the implicit receiver; `Some(decl)` requires
    /// the qualifier to resolve to `decl`.
    pub fn is_field_read_from_instance(
        &self,
        expr: ExprId,
        field: FieldId,
        instance: Option<Declaration>,
    ) -> bool {
        let matched = self.matches(expr, field, instance, 0);
        trace!(?expr, ?field, ?instance, matched, "provenance");
        matched
    }

    fn matches(
        &self,
        expr: ExprId,
        field: FieldId,
        instance: Option<Declaration>,
        depth: u32,
    ) -> bool {
        if depth >= MAX_EXPR_CHECK_DEPTH {
            return false;
        }
        let Some(node) = self.ctx.arena.expr(expr) else {
            return false;
        };
        let depth = depth + 1;

        match &node.kind {
            Expression::FieldAccess {
                qualifier,
                reference,
            } => {
                if self.refers_to_field(*reference, field)
                    && self.qualifier_selects(*qualifier, instance)
                {
                    return true;
                }
                match qualifier {
                    Some(qualifier) if self.is_field_access(*qualifier) => {
                        self.matches(*qualifier, field, instance, depth)
                    }
                    _ => false,
                }
            }
            Expression::Parenthesized { inner } => self.matches(*inner, field, instance, depth),
            // Both the condition and one branch must read the field:
            // `flag ? other.x : 0` alone is not a copy of `x`.
            Expression::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.matches(*condition, field, instance, depth)
                    && (self.matches(*when_true, field, instance, depth)
                        || self.matches(*when_false, field, instance, depth))
            }
            Expression::Polyadic { operands, .. } => operands
                .iter()
                .any(|&operand| self.matches(operand, field, instance, depth)),
            Expression::Call {
                receiver: Some(receiver),
                ..
            } => self.matches(*receiver, field, instance, depth),
            Expression::Call {
                receiver: None,
                arguments,
                ..
            } => arguments
                .iter()
                .any(|&arg| self.matches(arg, field, instance, depth)),
            Expression::This | Expression::Other { .. } => false,
        }
    }

    fn refers_to_field(&self, reference: RefId, field: FieldId) -> bool {
        self.ctx.resolver.resolve(reference) == Some(Declaration::Field(field))
    }

    /// Implicit receiver: no qualifier, or `this`. Bound instance: a
    /// qualifier that resolves to exactly that declaration.
    fn qualifier_selects(&self, qualifier: Option<ExprId>, instance: Option<Declaration>) -> bool {
        let qualifier = match qualifier {
            Some(q) => match self.ctx.arena.expr(q) {
                Some(node) => Some(node),
                None => return false,
            },
            None => None,
        };
        match (instance, qualifier) {
            (None, None) => true,
            (None, Some(node)) => matches!(node.kind, Expression::This),
            (Some(instance), Some(node)) => match &node.kind {
                Expression::FieldAccess { reference, .. } => {
                    self.ctx.resolver.resolve(*reference) == Some(instance)
                }
                _ => false,
            },
            (Some(_), None) => false,
        }
    }

    fn is_field_access(&self, expr: ExprId) -> bool {
        self.ctx
            .arena
            .expr(expr)
            .is_some_and(|node| matches!(node.kind, Expression::FieldAccess { .. }))
    }
}

/// Convenience wrapper around [`ProvenanceAnalyzer::is_field_read_from_instance`].
pub fn is_field_read_from_instance(
    ctx: CheckerContext<'_>,
    expr: ExprId,
    field: FieldId,
    instance: Option<Declaration>,
) -> bool {
    ProvenanceAnalyzer::new(ctx).is_field_read_from_instance(expr, field, instance)
}
