use logger_tree::aggregator::{build_tree, RowState};
use logger_tree::flamegraph::{generate_flamegraph, FlamegraphConfig};
use logger_tree::output::{read_snapshot, render_rows, validate_path, write_snapshot, write_svg};
use logger_tree::parser::{check_snapshot, to_snapshot};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_write_and_read_snapshot() {
    let tree = build_tree(&["com.acme.api", "com.acme.api", "com.acme", "org"]);
    let snapshot = to_snapshot(&tree, "events.json");
    let temp_file = NamedTempFile::new().unwrap();

    write_snapshot(&snapshot, temp_file.path()).unwrap();
    let loaded = read_snapshot(temp_file.path()).unwrap();

    assert_eq!(loaded.total_events, 4);
    assert_eq!(loaded.node_count, 4);
    assert_eq!(loaded.source, "events.json");
    assert_eq!(loaded.nodes[0].full_name, "com");
    assert_eq!(loaded.nodes[0].frequency, 3);
    assert!(check_snapshot(&loaded).is_empty());
}

#[test]
fn test_snapshot_omits_empty_children() {
    let tree = build_tree(&["leaf"]);
    let json = serde_json::to_value(to_snapshot(&tree, "x")).unwrap();
    assert!(json["nodes"][0].get("children").is_none());
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/tree.json");

    let tree = build_tree(&["a"]);
    write_snapshot(&to_snapshot(&tree, "x"), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_flamegraph_written_to_disk() {
    let tree = build_tree(&["com.acme.api", "com.acme.db", ".blank"]);
    let config = FlamegraphConfig::new().with_title("Loggers").with_width(800);
    let svg = generate_flamegraph(&tree, Some(&config)).unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("loggers.svg");
    write_svg(&svg, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<svg"));
}

#[test]
fn test_render_rows_to_depth() {
    let tree = build_tree(&["a.b.c", "a.b.c", "a.d", "e"]);
    let mut rows = RowState::new(&tree);
    rows.expand_to_depth(2);

    let expected = [
        "- Select All",
        "  - a [3]",
        "    + b [2]",
        "      d [1]",
        "    e [1]",
    ]
    .join("\n");
    assert_eq!(render_rows(&rows, &tree), expected);
}
