//! Missing and suspicious field copies in copy constructors.

use copyck_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use copyck_common::limits::MAX_AST_DEPTH;
use copyck_common::{Diagnostic, Span};
use copyck_model::printer::expr_text;
use copyck_model::{
    ConstructorId, Declaration, ExprId, Expression, FieldId, ParameterId, ReferenceResolver,
    Statement, StmtId,
};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::classifier::copy_parameter;
use crate::context::CheckerContext;
use crate::field_catalog::copyable_fields;
use crate::provenance::ProvenanceAnalyzer;
use crate::sink::DiagnosticSink;

pub struct CompletenessChecker<'a> {
    ctx: CheckerContext<'a>,
    analyzer: ProvenanceAnalyzer<'a>,
}

/// Per-constructor working state.
struct Pass<'s> {
    constructor: ConstructorId,
    parameter: ParameterId,
    fields: &'s [FieldId],
    unassigned: FxHashSet<FieldId>,
}

impl<'a> CompletenessChecker<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        CompletenessChecker {
            ctx,
            analyzer: ProvenanceAnalyzer::new(ctx),
        }
    }

    /// Check one constructor. Returns the copyable fields it never copies,
    /// in declaration order; empty (and silent) when `constructor` is not a
    /// copy constructor.
    pub fn check(
        &self,
        constructor: ConstructorId,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<FieldId> {
        let Some(parameter) = copy_parameter(self.ctx.arena, constructor) else {
            return Vec::new();
        };
        let Some(data) = self.ctx.arena.constructor(constructor) else {
            return Vec::new();
        };
        let Some(class) = data.class else {
            return Vec::new();
        };

        let fields = copyable_fields(self.ctx.arena, class);
        let mut pass = Pass {
            constructor,
            parameter,
            fields: &fields,
            unassigned: fields.iter().copied().collect(),
        };
        self.visit_statements(&mut pass, &data.body, 0, sink);

        let missing: Vec<FieldId> = fields
            .iter()
            .copied()
            .filter(|field| pass.unassigned.contains(field))
            .collect();
        debug!(
            constructor = %self.ctx.arena.constructor_signature(constructor),
            copyable = fields.len(),
            missing = missing.len(),
            "completeness checked"
        );
        if !missing.is_empty() {
            sink.report(self.missing_fields_diagnostic(constructor, parameter, &missing));
        }
        missing
    }

    fn visit_statements(
        &self,
        pass: &mut Pass<'_>,
        statements: &[StmtId],
        depth: u32,
        sink: &mut dyn DiagnosticSink,
    ) {
        if depth >= MAX_AST_DEPTH {
            return;
        }
        for &stmt in statements {
            let Some(node) = self.ctx.arena.stmt(stmt) else {
                continue;
            };
            if let Statement::Assignment { lhs, rhs } = &node.kind {
                self.visit_assignment(pass, node.span, *lhs, *rhs, sink);
            }
            let children: Vec<StmtId> = node.kind.children().collect();
            if !children.is_empty() {
                self.visit_statements(pass, &children, depth + 1, sink);
            }
        }
    }

    fn visit_assignment(
        &self,
        pass: &mut Pass<'_>,
        span: Span,
        lhs: ExprId,
        rhs: Option<ExprId>,
        sink: &mut dyn DiagnosticSink,
    ) {
        let Some(field) = self.assigned_field(lhs) else {
            return;
        };
        if !pass.fields.contains(&field)
            || !self.analyzer.is_field_read_from_instance(lhs, field, None)
        {
            return;
        }

        let instance = Some(Declaration::Parameter(pass.parameter));
        match rhs {
            Some(rhs) if self.analyzer.is_field_read_from_instance(rhs, field, instance) => {
                pass.unassigned.remove(&field);
            }
            Some(rhs) => {
                let value = expr_text(self.ctx.arena, rhs);
                let name = self.field_name(field);
                sink.report(Diagnostic::from_code(
                    self.ctx.file_of(pass.constructor),
                    span,
                    diagnostic_codes::SUSPICIOUS_ASSIGNMENT_IN_COPY_CONSTRUCTOR_OF_TO_FIELD,
                    &[value.as_str(), name],
                ));
            }
            None => {}
        }
    }

    /// The field an assignment target's own reference resolves to.
    fn assigned_field(&self, lhs: ExprId) -> Option<FieldId> {
        let Expression::FieldAccess { reference, .. } = &self.ctx.arena.expr(lhs)?.kind else {
            return None;
        };
        self.ctx.resolver.resolve(*reference)?.as_field()
    }

    fn field_name(&self, field: FieldId) -> &'a str {
        self.ctx.arena.field(field).map_or("", |f| f.name.as_str())
    }

    fn missing_fields_diagnostic(
        &self,
        constructor: ConstructorId,
        parameter: ParameterId,
        missing: &[FieldId],
    ) -> Diagnostic {
        let file = self.ctx.file_of(constructor);
        let name_span = self
            .ctx
            .arena
            .constructor(constructor)
            .map_or(Span::DUMMY, |c| c.name_span);
        let parameter_name = self
            .ctx
            .arena
            .parameter(parameter)
            .map_or("", |p| p.name.as_str());

        let mut diagnostic = Diagnostic::from_code(
            file,
            name_span,
            diagnostic_codes::COPY_CONSTRUCTOR_DOES_NOT_COPY_ALL_FIELDS,
            &[],
        );
        for &field in missing {
            let span = self.ctx.arena.field(field).map_or(Span::DUMMY, |f| f.span);
            diagnostic = diagnostic.with_related(
                file,
                span,
                format_message(
                    diagnostic_messages::FIELD_IS_NOT_COPIED_FROM,
                    &[self.field_name(field), parameter_name],
                ),
            );
        }
        diagnostic
    }
}
