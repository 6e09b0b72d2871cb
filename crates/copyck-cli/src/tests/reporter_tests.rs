use copyck_common::{Diagnostic, Span};
use copyck_model::{NodeArena, ProgramSource, bind_program};

use super::line_map::LineMap;
use super::reporter::{Reporter, render_json};

fn bound_point() -> NodeArena {
    let source: ProgramSource = ProgramSource::from_json(
        r#"{
            "file": "Point.java",
            "classes": [{
                "name": "Point",
                "fields": [{"name": "x", "type": "int"}],
                "constructors": [{"parameters": [{"name": "other", "type": "Point"}]}]
            }]
        }"#,
    )
    .expect("valid program source");
    bind_program(&[source]).expect("program binds")
}

#[test]
fn line_map_positions() {
    let source = "ab\ncd\r\nef";
    let map = LineMap::build(source);
    assert_eq!(map.position(0, source), (0, 0));
    assert_eq!(map.position(4, source), (1, 1));
    assert_eq!(map.position(7, source), (2, 0));
}

#[test]
fn formats_location_code_and_snippet() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("A.java", "class A {\n    A(A other) {\n    }\n}\n");
    let diagnostic = Diagnostic::from_code("A.java", Span::at(14, 1), 1001, &[]);

    let output = reporter.format_diagnostic(&diagnostic);
    assert_eq!(
        output,
        "A.java:2:5 - advisory CC1001: Copy constructor does not copy all fields\n    2       A(A other) {\n            ~"
    );
}

#[test]
fn renders_related_information() {
    let arena = bound_point();
    let class = arena.lookup_class("Point").expect("class bound");
    let ctor = arena.class(class).unwrap().constructors[0];
    let field = arena.class(class).unwrap().fields[0];
    let diagnostic = Diagnostic::from_code(
        "Point.java",
        arena.constructor(ctor).unwrap().name_span,
        1001,
        &[],
    )
    .with_related(
        "Point.java",
        arena.field(field).unwrap().span,
        "Field 'x' is not copied from 'other'.".to_string(),
    );

    let mut reporter = Reporter::new(false).with_arena_sources(&arena);
    let output = reporter.render(&[diagnostic]);
    assert!(output.contains("advisory CC1001"), "{output}");
    assert!(output.contains("  Related: Point.java:"), "{output}");
    assert!(output.contains("Field 'x' is not copied from 'other'."), "{output}");
    assert!(output.contains("    Point(Point other) {"), "{output}");
    assert!(output.ends_with("Found 1 advisory in 1 file.\n"), "{output}");
}

#[test]
fn unknown_file_falls_back_to_name() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::from_code("Nowhere.java", Span::at(0, 3), 1003, &[]);
    let output = reporter.format_diagnostic(&diagnostic);
    assert!(output.starts_with("Nowhere.java - advisory CC1003: "), "{output}");
}

#[test]
fn summary_counts_files() {
    let reporter = Reporter::new(false);
    let diagnostics = vec![
        Diagnostic::from_code("A.java", Span::at(0, 1), 1001, &[]),
        Diagnostic::from_code("B.java", Span::at(0, 1), 1003, &[]),
        Diagnostic::from_code("B.java", Span::at(2, 1), 1001, &[]),
    ];
    assert_eq!(
        reporter.format_summary(&diagnostics),
        "Found 3 advisories in 2 files."
    );
}

#[test]
fn json_output_is_an_array() {
    let diagnostics = vec![Diagnostic::from_code("A.java", Span::at(4, 2), 1001, &[])];
    let compact = render_json(&diagnostics, false).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&compact).expect("valid json");
    assert_eq!(value[0]["code"], 1001);
    assert_eq!(value[0]["category"], "advisory");
    assert_eq!(value[0]["start"], 4);
    assert!(render_json(&[], true).expect("serializes").starts_with('['));
}
