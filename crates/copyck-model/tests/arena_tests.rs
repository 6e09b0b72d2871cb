use copyck_common::Span;
use copyck_model::printer::expr_text;
use copyck_model::{Declaration, Expression, NodeArena, ReferenceResolver, Statement};

fn point_hierarchy() -> (NodeArena, copyck_model::ClassId, copyck_model::ClassId) {
    let mut arena = NodeArena::new();
    let file = arena.add_file("Shapes.java");
    let point = arena.add_class(file, "Point", "geo.Point", None);
    let color_point = arena.add_class(
        file,
        "ColorPoint",
        "geo.ColorPoint",
        Some("Point".to_string()),
    );
    arena.add_field(point, "x", "int", false, false, false);
    arena.add_field(color_point, "color", "int", false, false, false);
    (arena, point, color_point)
}

#[test]
fn test_superclass_is_resolved_by_lookup() {
    let (arena, point, color_point) = point_hierarchy();
    assert_eq!(arena.superclass_of(color_point), Some(point));
    assert_eq!(arena.superclass_of(point), None);
    assert!(arena.is_subclass_of(color_point, point));
    assert!(!arena.is_subclass_of(point, color_point));
}

#[test]
fn test_unknown_superclass_resolves_to_none() {
    let mut arena = NodeArena::new();
    let file = arena.add_file("A.java");
    let a = arena.add_class(file, "A", "A", Some("java.lang.Missing".to_string()));
    assert_eq!(arena.superclass_of(a), None);
    assert_eq!(arena.ancestors(a), vec![a]);
}

#[test]
fn test_cyclic_extends_terminates() {
    let mut arena = NodeArena::new();
    let file = arena.add_file("Cycle.java");
    let a = arena.add_class(file, "A", "A", Some("B".to_string()));
    let b = arena.add_class(file, "B", "B", Some("A".to_string()));
    assert_eq!(arena.ancestors(a), vec![a, b]);
    assert!(arena.find_field_in_hierarchy(a, "missing").is_none());
}

#[test]
fn test_field_lookup_prefers_nearest_declaration() {
    let (mut arena, point, color_point) = point_hierarchy();
    let inherited = arena.find_field_in_hierarchy(color_point, "x").unwrap();
    assert_eq!(arena.field(inherited).unwrap().class, point);

    let shadow = arena.add_field(color_point, "x", "int", false, false, false);
    assert_eq!(arena.find_field_in_hierarchy(color_point, "x"), Some(shadow));
    assert_ne!(shadow, inherited);
}

#[test]
fn test_simple_name_lookup_rejects_ambiguity() {
    let mut arena = NodeArena::new();
    let file = arena.add_file("A.java");
    arena.add_class(file, "Node", "a.Node", None);
    arena.add_class(file, "Node", "b.Node", None);
    assert_eq!(arena.lookup_class_by_simple_name("Node"), None);
    assert!(arena.lookup_class("a.Node").is_some());
}

#[test]
fn test_superclass_prefers_own_package_over_ambiguous_simple_name() {
    let mut arena = NodeArena::new();
    let file = arena.add_file("Shapes.java");
    let local = arena.add_class(file, "Point", "a.Point", None);
    arena.add_class(file, "Point", "b.Point", None);
    let color_point = arena.add_class(file, "ColorPoint", "a.ColorPoint", Some("Point".to_string()));
    let elsewhere = arena.add_class(file, "Marker", "c.Marker", Some("Point".to_string()));
    assert_eq!(arena.superclass_of(color_point), Some(local));
    assert_eq!(arena.superclass_of(elsewhere), None);
}

#[test]
fn test_constructor_signature_and_file() {
    let (mut arena, point, _) = point_hierarchy();
    let ctor = arena.add_constructor(Some(point));
    arena.add_parameter(ctor, "other", "geo.Point");
    assert_eq!(arena.constructor_signature(ctor), "Point(geo.Point)");
    assert_eq!(
        arena.constructor_file(ctor).map(|f| arena.file_name(f)),
        Some("Shapes.java")
    );

    let detached = arena.add_constructor(None);
    assert_eq!(arena.constructor_file(detached), None);
    assert_eq!(arena.constructor_signature(detached), "<anonymous>()");
}

#[test]
fn test_references_resolve_through_arena() {
    let (mut arena, point, _) = point_hierarchy();
    let x = arena.find_field_in_hierarchy(point, "x").unwrap();
    let bound = arena.add_reference("x");
    let unbound = arena.add_reference("nope");
    arena.bind_reference(bound, Declaration::Field(x));

    assert_eq!(arena.resolve(bound), Some(Declaration::Field(x)));
    assert_eq!(arena.resolve(unbound), None);
}

#[test]
fn test_printer_renders_expression_shapes() {
    let (mut arena, point, _) = point_hierarchy();
    let ctor = arena.add_constructor(Some(point));
    let other = arena.add_parameter(ctor, "other", "geo.Point");

    let other_ref = arena.add_reference("other");
    arena.bind_reference(other_ref, Declaration::Parameter(other));
    let qualifier = arena.add_expr(
        Expression::FieldAccess {
            qualifier: None,
            reference: other_ref,
        },
        Span::DUMMY,
    );
    let x_ref = arena.add_reference("x");
    let access = arena.add_expr(
        Expression::FieldAccess {
            qualifier: Some(qualifier),
            reference: x_ref,
        },
        Span::DUMMY,
    );
    let one = arena.add_expr(
        Expression::Other {
            text: Some("1".to_string()),
        },
        Span::DUMMY,
    );
    let sum = arena.add_expr(
        Expression::Polyadic {
            operator: "+".to_string(),
            operands: vec![access, one],
        },
        Span::DUMMY,
    );
    let paren = arena.add_expr(Expression::Parenthesized { inner: sum }, Span::DUMMY);
    let cond = arena.add_expr(
        Expression::Conditional {
            condition: access,
            when_true: paren,
            when_false: one,
        },
        Span::DUMMY,
    );

    assert_eq!(expr_text(&arena, access), "other.x");
    assert_eq!(expr_text(&arena, paren), "(other.x + 1)");
    assert_eq!(expr_text(&arena, cond), "other.x ? (other.x + 1) : 1");
}

#[test]
fn test_statement_children_cover_all_branches() {
    let mut arena = NodeArena::new();
    let a = arena.add_stmt(Statement::Other, Span::DUMMY);
    let b = arena.add_stmt(Statement::Other, Span::DUMMY);
    let cond = arena.add_expr(Expression::This, Span::DUMMY);
    let stmt = Statement::If {
        condition: cond,
        then_branch: vec![a],
        else_branch: Some(vec![b]),
    };
    assert_eq!(stmt.children().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(stmt.primary_expression(), None);
    assert_eq!(Statement::Expression(cond).primary_expression(), Some(cond));
}
