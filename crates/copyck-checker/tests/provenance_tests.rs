use std::collections::HashMap;

use copyck_checker::CheckerContext;
use copyck_checker::provenance::{ProvenanceAnalyzer, is_field_read_from_instance};
use copyck_common::Span;
use copyck_common::limits::MAX_EXPR_CHECK_DEPTH;
use copyck_model::{
    CallKind, ClassId, Declaration, ExprId, Expression, FieldId, NodeArena, ParameterId, RefId,
    ReferenceResolver,
};

struct Fixture {
    arena: NodeArena,
    class: ClassId,
    x: FieldId,
    y: FieldId,
    param: ParameterId,
}

impl Fixture {
    fn new() -> Self {
        let mut arena = NodeArena::new();
        let file = arena.add_file("Point.java");
        let class = arena.add_class(file, "Point", "Point", None);
        let x = arena.add_field(class, "x", "int", false, false, false);
        let y = arena.add_field(class, "y", "int", false, false, false);
        let ctor = arena.add_constructor(Some(class));
        let param = arena.add_parameter(ctor, "other", "Point");
        Fixture {
            arena,
            class,
            x,
            y,
            param,
        }
    }

    fn expr(&mut self, kind: Expression) -> ExprId {
        self.arena.add_expr(kind, Span::DUMMY)
    }

    fn reference(&mut self, name: &str, target: Option<Declaration>) -> RefId {
        let reference = self.arena.add_reference(name);
        if let Some(target) = target {
            self.arena.bind_reference(reference, target);
        }
        reference
    }

    fn access(&mut self, qualifier: Option<ExprId>, name: &str, target: Option<Declaration>) -> ExprId {
        let reference = self.reference(name, target);
        self.expr(Expression::FieldAccess {
            qualifier,
            reference,
        })
    }

    fn other(&mut self) -> ExprId {
        let param = self.param;
        self.access(None, "other", Some(Declaration::Parameter(param)))
    }

    /// `other.<name>` resolving to `field`.
    fn other_field(&mut self, field: FieldId) -> ExprId {
        let other = self.other();
        let name = self.arena.field(field).unwrap().name.clone();
        self.access(Some(other), &name, Some(Declaration::Field(field)))
    }

    fn this_field(&mut self, field: FieldId) -> ExprId {
        let this = self.expr(Expression::This);
        let name = self.arena.field(field).unwrap().name.clone();
        self.access(Some(this), &name, Some(Declaration::Field(field)))
    }

    fn call(&mut self, receiver: Option<ExprId>, name: &str, arguments: Vec<ExprId>) -> ExprId {
        let callee = self.reference(name, None);
        self.expr(Expression::Call {
            kind: CallKind::Invocation,
            receiver,
            callee,
            arguments,
        })
    }

    fn literal(&mut self, text: &str) -> ExprId {
        self.expr(Expression::Other {
            text: Some(text.to_string()),
        })
    }

    fn reads(&self, expr: ExprId, field: FieldId, instance: Option<Declaration>) -> bool {
        is_field_read_from_instance(CheckerContext::new(&self.arena), expr, field, instance)
    }

    fn reads_from_other(&self, expr: ExprId, field: FieldId) -> bool {
        self.reads(expr, field, Some(Declaration::Parameter(self.param)))
    }
}

#[test]
fn test_parameter_qualified_field_matches() {
    let mut fx = Fixture::new();
    let expr = fx.other_field(fx.x);
    assert!(fx.reads_from_other(expr, fx.x));
    assert!(!fx.reads_from_other(expr, fx.y));
}

#[test]
fn test_implicit_receiver_matches_bare_and_this_qualified() {
    let mut fx = Fixture::new();
    let bare = fx.access(None, "x", Some(Declaration::Field(fx.x)));
    let this_x = fx.this_field(fx.x);
    assert!(fx.reads(bare, fx.x, None));
    assert!(fx.reads(this_x, fx.x, None));
    assert!(!fx.reads_from_other(bare, fx.x));
    assert!(!fx.reads_from_other(this_x, fx.x));
}

#[test]
fn test_parameter_qualified_field_is_not_implicit_receiver() {
    let mut fx = Fixture::new();
    let expr = fx.other_field(fx.x);
    assert!(!fx.reads(expr, fx.x, None));
}

#[test]
fn test_shadowing_field_with_same_name_does_not_match() {
    let mut fx = Fixture::new();
    let file = fx.arena.class(fx.class).unwrap().file;
    let sub = fx.arena.add_class(file, "Sub", "Sub", Some("Point".to_string()));
    let shadow = fx.arena.add_field(sub, "x", "int", false, false, false);
    let other = fx.other();
    let expr = fx.access(Some(other), "x", Some(Declaration::Field(shadow)));
    assert!(!fx.reads_from_other(expr, fx.x));
    assert!(fx.reads_from_other(expr, shadow));
}

#[test]
fn test_unresolved_reference_does_not_match() {
    let mut fx = Fixture::new();
    let other = fx.other();
    let expr = fx.access(Some(other), "x", None);
    assert!(!fx.reads_from_other(expr, fx.x));
}

#[test]
fn test_unresolved_qualifier_does_not_match() {
    let mut fx = Fixture::new();
    let qualifier = fx.access(None, "other", None);
    let expr = fx.access(Some(qualifier), "x", Some(Declaration::Field(fx.x)));
    assert!(!fx.reads_from_other(expr, fx.x));
}

#[test]
fn test_parenthesized_expression_is_transparent() {
    let mut fx = Fixture::new();
    let inner = fx.other_field(fx.x);
    let expr = fx.expr(Expression::Parenthesized { inner });
    assert!(fx.reads_from_other(expr, fx.x));
}

#[test]
fn test_polyadic_matches_any_operand() {
    let mut fx = Fixture::new();
    let one = fx.literal("1");
    let x = fx.other_field(fx.x);
    let expr = fx.expr(Expression::Polyadic {
        operator: "+".to_string(),
        operands: vec![one, x],
    });
    assert!(fx.reads_from_other(expr, fx.x));
    assert!(!fx.reads_from_other(expr, fx.y));
}

#[test]
fn test_call_with_receiver_searches_receiver_only() {
    let mut fx = Fixture::new();
    let receiver = fx.other_field(fx.x);
    let argument = fx.other_field(fx.y);
    let expr = fx.call(Some(receiver), "merge", vec![argument]);
    assert!(fx.reads_from_other(expr, fx.x));
    assert!(!fx.reads_from_other(expr, fx.y));
}

#[test]
fn test_call_without_receiver_searches_arguments() {
    let mut fx = Fixture::new();
    let zero = fx.literal("0");
    let argument = fx.other_field(fx.y);
    let expr = fx.call(None, "copyOf", vec![zero, argument]);
    assert!(fx.reads_from_other(expr, fx.y));
    assert!(!fx.reads_from_other(expr, fx.x));
}

#[test]
fn test_qualifier_chain_reads_inner_field() {
    // other.x.y reads x off other.
    let mut fx = Fixture::new();
    let other_x = fx.other_field(fx.x);
    let expr = fx.access(Some(other_x), "y", None);
    assert!(fx.reads_from_other(expr, fx.x));
    assert!(!fx.reads_from_other(expr, fx.y));
}

#[test]
fn test_conditional_requires_condition_and_a_branch() {
    let mut fx = Fixture::new();

    // other.x != null ? other.x : null
    let cond_x = fx.other_field(fx.x);
    let null = fx.literal("null");
    let condition = fx.expr(Expression::Polyadic {
        operator: "!=".to_string(),
        operands: vec![cond_x, null],
    });
    let then_x = fx.other_field(fx.x);
    let otherwise = fx.literal("null");
    let guarded = fx.expr(Expression::Conditional {
        condition,
        when_true: then_x,
        when_false: otherwise,
    });
    assert!(fx.reads_from_other(guarded, fx.x));

    // flag ? other.x : 0 -- the branch alone is not enough.
    let flag = fx.literal("flag");
    let branch_x = fx.other_field(fx.x);
    let zero = fx.literal("0");
    let unguarded = fx.expr(Expression::Conditional {
        condition: flag,
        when_true: branch_x,
        when_false: zero,
    });
    assert!(!fx.reads_from_other(unguarded, fx.x));
}

#[test]
fn test_this_and_literals_never_match() {
    let mut fx = Fixture::new();
    let this = fx.expr(Expression::This);
    let literal = fx.literal("42");
    let opaque = fx.expr(Expression::Other { text: None });
    for expr in [this, literal, opaque] {
        assert!(!fx.reads(expr, fx.x, None));
        assert!(!fx.reads_from_other(expr, fx.x));
    }
}

#[test]
fn test_missing_expression_does_not_match() {
    let fx = Fixture::new();
    assert!(!fx.reads_from_other(ExprId(1000), fx.x));
}

#[test]
fn test_nesting_beyond_depth_limit_stops_matching() {
    let mut fx = Fixture::new();
    let mut shallow = fx.other_field(fx.x);
    for _ in 0..10 {
        shallow = fx.expr(Expression::Parenthesized { inner: shallow });
    }
    assert!(fx.reads_from_other(shallow, fx.x));

    let mut deep = fx.other_field(fx.x);
    for _ in 0..MAX_EXPR_CHECK_DEPTH {
        deep = fx.expr(Expression::Parenthesized { inner: deep });
    }
    assert!(!fx.reads_from_other(deep, fx.x));
}

/// Resolver that ignores the arena's bound table.
struct MapResolver(HashMap<RefId, Declaration>);

impl ReferenceResolver for MapResolver {
    fn resolve(&self, reference: RefId) -> Option<Declaration> {
        self.0.get(&reference).copied()
    }
}

#[test]
fn test_injected_resolver_is_used() {
    let mut fx = Fixture::new();
    let other_ref = fx.reference("other", None);
    let other = fx.expr(Expression::FieldAccess {
        qualifier: None,
        reference: other_ref,
    });
    let x_ref = fx.reference("x", None);
    let expr = fx.expr(Expression::FieldAccess {
        qualifier: Some(other),
        reference: x_ref,
    });
    assert!(!fx.reads_from_other(expr, fx.x));

    let resolver = MapResolver(HashMap::from([
        (other_ref, Declaration::Parameter(fx.param)),
        (x_ref, Declaration::Field(fx.x)),
    ]));
    let analyzer = ProvenanceAnalyzer::new(CheckerContext::with_resolver(&fx.arena, &resolver));
    assert!(analyzer.is_field_read_from_instance(
        expr,
        fx.x,
        Some(Declaration::Parameter(fx.param))
    ));
}
