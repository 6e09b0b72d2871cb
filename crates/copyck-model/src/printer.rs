//! Source-like rendering of expressions.
//!
//! Used for diagnostic messages (`'other.y'`) and by the binder, which
//! renders every constructor body and records where each expression ended
//! up so diagnostics point into the rendered text.

use copyck_common::Span;

use crate::base::{ExprId, RefId};
use crate::node::{CallKind, Expression};
use crate::node_arena::NodeArena;

pub struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
    base: u32,
    spans: Vec<(ExprId, Span)>,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self::with_offset(arena, 0)
    }

    /// A printer whose recorded spans start at byte `base` of the enclosing text.
    pub fn with_offset(arena: &'a NodeArena, base: u32) -> Self {
        Printer {
            arena,
            out: String::new(),
            base,
            spans: Vec::new(),
        }
    }

    fn position(&self) -> u32 {
        self.base
            .saturating_add(u32::try_from(self.out.len()).unwrap_or(u32::MAX))
    }

    fn reference_name(&self, reference: RefId) -> &'a str {
        self.arena
            .reference(reference)
            .map_or("<unresolved>", |r| r.name.as_str())
    }

    pub fn print_expr(&mut self, expr: ExprId) {
        let start = self.position();
        let Some(node) = self.arena.expr(expr) else {
            self.out.push_str("<missing>");
            return;
        };

        match &node.kind {
            Expression::FieldAccess {
                qualifier,
                reference,
            } => {
                if let Some(qualifier) = qualifier {
                    self.print_expr(*qualifier);
                    self.out.push('.');
                }
                let name = self.reference_name(*reference);
                self.out.push_str(name);
            }
            Expression::This => self.out.push_str("this"),
            Expression::Call {
                kind,
                receiver,
                callee,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    self.print_expr(*receiver);
                    self.out.push('.');
                }
                if *kind == CallKind::New {
                    self.out.push_str("new ");
                }
                let name = self.reference_name(*callee);
                self.out.push_str(name);
                self.out.push('(');
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.print_expr(*arg);
                }
                self.out.push(')');
            }
            Expression::Polyadic { operator, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        self.out.push(' ');
                        self.out.push_str(operator);
                        self.out.push(' ');
                    }
                    self.print_expr(*operand);
                }
            }
            Expression::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.print_expr(*condition);
                self.out.push_str(" ? ");
                self.print_expr(*when_true);
                self.out.push_str(" : ");
                self.print_expr(*when_false);
            }
            Expression::Parenthesized { inner } => {
                self.out.push('(');
                self.print_expr(*inner);
                self.out.push(')');
            }
            Expression::Other { text } => {
                self.out.push_str(text.as_deref().unwrap_or("<expr>"));
            }
        }

        let end = self.position();
        self.spans.push((expr, Span::new(start, end)));
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Rendered text plus the span of every printed expression (children
    /// before parents).
    pub fn into_parts(self) -> (String, Vec<(ExprId, Span)>) {
        (self.out, self.spans)
    }
}

/// Render a single expression.
pub fn expr_text(arena: &NodeArena, expr: ExprId) -> String {
    let mut printer = Printer::new(arena);
    printer.print_expr(expr);
    printer.finish()
}
