use copyck_checker::synthesizer::{ConstructorSynthesizer, Synthesis};
use copyck_model::{ClassId, NodeArena, ProgramSource, bind_program};
use serde_json::{Value, json};

fn bind(classes: Value) -> NodeArena {
    let source: ProgramSource =
        serde_json::from_value(json!({"file": "Shapes.java", "classes": classes}))
            .expect("valid program source");
    bind_program(&[source]).expect("program binds")
}

fn class(arena: &NodeArena, name: &str) -> ClassId {
    arena.lookup_class(name).expect("class exists")
}

#[test]
fn test_generates_field_copies_in_declaration_order() {
    let arena = bind(json!([{
        "name": "Point",
        "package": "geo",
        "fields": [
            {"name": "x", "type": "int"},
            {"name": "count", "type": "int", "static": true},
            {"name": "id", "type": "String", "final": true, "initializer": "next()"},
            {"name": "y", "type": "int"}
        ]
    }]));
    let synthesis = ConstructorSynthesizer::new(&arena).synthesize(class(&arena, "geo.Point"));
    assert_eq!(
        synthesis,
        Synthesis::Generated(
            "public Point(Point other) {\n    this.x = other.x;\n    this.y = other.y;\n}"
                .to_string()
        )
    );
}

#[test]
fn test_chains_to_superclass_copy_constructor() {
    let arena = bind(json!([
        {
            "name": "Point",
            "constructors": [{"parameters": [{"name": "other", "type": "Point"}]}]
        },
        {"name": "ColorPoint", "extends": "Point", "fields": [{"name": "color", "type": "int"}]}
    ]));
    let synthesis = ConstructorSynthesizer::new(&arena)
        .with_parameter_name("source")
        .synthesize(class(&arena, "ColorPoint"));
    assert_eq!(
        synthesis,
        Synthesis::Generated(
            "public ColorPoint(ColorPoint source) {\n    super(source);\n    this.color = source.color;\n}"
                .to_string()
        )
    );
}

#[test]
fn test_no_super_call_without_superclass_copy_constructor() {
    let arena = bind(json!([
        {"name": "Point"},
        {"name": "ColorPoint", "extends": "Point"}
    ]));
    let synthesis = ConstructorSynthesizer::new(&arena).synthesize(class(&arena, "ColorPoint"));
    assert_eq!(
        synthesis,
        Synthesis::Generated("public ColorPoint(ColorPoint other) {\n}".to_string())
    );
}

#[test]
fn test_refuses_when_copy_constructor_exists() {
    let arena = bind(json!([{
        "name": "Point",
        "fields": [{"name": "x", "type": "int"}],
        "constructors": [{"parameters": [{"name": "other", "type": "Point"}]}]
    }]));
    let point = class(&arena, "Point");
    let existing = arena.class(point).unwrap().constructors[0];

    let mut inserted: Vec<(ClassId, String)> = Vec::new();
    let synthesis = ConstructorSynthesizer::new(&arena).generate_into(point, &mut inserted);
    assert_eq!(synthesis, Synthesis::AlreadyExists(existing));
    assert!(inserted.is_empty());
}

#[test]
fn test_generate_into_hands_text_to_inserter() {
    let arena = bind(json!([{"name": "Point", "fields": [{"name": "x", "type": "int"}]}]));
    let point = class(&arena, "Point");
    let mut inserted: Vec<(ClassId, String)> = Vec::new();
    ConstructorSynthesizer::new(&arena)
        .with_indent("\t")
        .generate_into(point, &mut inserted);
    assert_eq!(
        inserted,
        vec![(point, "public Point(Point other) {\n\tthis.x = other.x;\n}".to_string())]
    );
}

#[test]
fn test_unknown_class() {
    let arena = NodeArena::new();
    assert_eq!(
        ConstructorSynthesizer::new(&arena).synthesize(ClassId(0)),
        Synthesis::UnknownClass
    );
}
