use lux_frontend::{CursorKind, InMemoryAdapter};
use lux_parser::{parse, ParseOptions, ParseStatus};
use std::path::Path;

const MARK: &str = "LUX::META;reflect";

/// A marked `struct S { int a; double b; }` parses, survives a JSON round
/// trip, and comes back structurally identical.
#[test]
fn marked_record_survives_a_json_round_trip() {
    let mut adapter = InMemoryAdapter::new();
    let root = adapter.root();
    let int_ty = adapter.add_builtin_type("int", 4, 4);
    let double_ty = adapter.add_builtin_type("double", 8, 8);
    let record = adapter.add_cursor(root, CursorKind::Record, "S", true, vec![MARK.to_string()]);
    let a = adapter.add_cursor(record, CursorKind::Field, "a", true, vec![]);
    adapter.set_cursor_type(a, int_ty);
    let b = adapter.add_cursor(record, CursorKind::Field, "b", true, vec![]);
    adapter.set_cursor_type(b, double_ty);
    adapter.set_field_offset_bits(b, 64);

    let opts = ParseOptions::new("e2e", "0.1.0");
    let (status, unit) = parse(&mut adapter, Path::new("s.hpp"), opts);
    assert_eq!(status, ParseStatus::Success);

    let doc = unit.to_json();
    let round_tripped = lux_meta::MetaUnit::from_json(&doc).expect("round trip parses back");

    assert_eq!(round_tripped.marked_records().len(), unit.marked_records().len());
    let original = unit.decl(unit.marked_records()[0]).as_record().unwrap();
    let restored = round_tripped
        .decl(round_tripped.marked_records()[0])
        .as_record()
        .unwrap();
    assert_eq!(original.fields.len(), restored.fields.len());
    assert_eq!(original.size, restored.size);
    assert_eq!(doc, round_tripped.to_json(), "re-serializing the restored unit is byte-for-byte identical");
}

/// An unmarked declaration is discovered (so it can be referenced as a
/// dependency) but never appears in a `marked_*` list.
#[test]
fn unmarked_declarations_are_not_marked() {
    let mut adapter = InMemoryAdapter::new();
    let root = adapter.root();
    adapter.add_cursor(root, CursorKind::Record, "Plain", true, vec![]);

    let opts = ParseOptions::new("e2e", "0.1.0");
    let (status, unit) = parse(&mut adapter, Path::new("plain.hpp"), opts);
    assert_eq!(status, ParseStatus::Success);
    assert!(unit.marked_records().is_empty());
}

/// A parse error from the front end is reported through the diagnostic
/// sink and the run is flagged as failed.
#[test]
fn front_end_open_failure_is_reported_through_the_sink() {
    let mut adapter = InMemoryAdapter::new();
    adapter.fail_next_open("no such file");
    let mut messages = Vec::new();
    let mut opts = ParseOptions::new("e2e", "0.1.0");
    opts.diagnostic_sink = Box::new(|msg| messages.push(msg.to_string()));

    let (status, _unit) = parse(&mut adapter, Path::new("missing.hpp"), opts);
    assert_eq!(status, ParseStatus::Failed);
    assert!(!messages.is_empty());
}
