use logger_tree::commands::{
    execute_search, execute_select, execute_tree, validate_args, validate_snapshot_file,
    SearchArgs, SelectArgs, TreeArgs,
};
use logger_tree::flamegraph::FlamegraphConfig;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const EVENTS: &str = r#"[
    {"logger": "com.acme.api"},
    {"logger": "com.acme.api"},
    {"logger": "com.acme.db"},
    {"logger": "com.acme"},
    {"logger": "org.example.Worker"}
]"#;

fn input_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EVENTS.as_bytes()).unwrap();
    file
}

#[test]
fn test_tree_command_writes_outputs() {
    let input = input_file();
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("tree.json");
    let svg_path = temp_dir.path().join("tree.svg");

    let args = TreeArgs {
        input: input.path().to_path_buf(),
        depth: Some(1),
        output_json: Some(json_path.clone()),
        output_svg: Some(svg_path.clone()),
        flamegraph_config: Some(FlamegraphConfig::new()),
        print_tree: true,
    };
    validate_args(&args).unwrap();

    let tree = execute_tree(args).unwrap();
    assert_eq!(tree.total_events(), 5);
    assert!(json_path.exists());
    assert!(svg_path.exists());

    validate_snapshot_file(&json_path).unwrap();
}

#[test]
fn test_tree_command_missing_input() {
    let args = TreeArgs {
        input: PathBuf::from("/definitely/not/here.json"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
    assert!(execute_tree(args).is_err());
}

#[test]
fn test_search_command() {
    let input = input_file();
    let hits = execute_search(SearchArgs {
        input: input.path().to_path_buf(),
        query: "WORKER".to_string(),
        case_sensitive: false,
    })
    .unwrap();
    assert_eq!(hits, vec!["org.example.Worker"]);

    let hits = execute_search(SearchArgs {
        input: input.path().to_path_buf(),
        query: "WORKER".to_string(),
        case_sensitive: true,
    })
    .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_search_command_empty_query() {
    let input = input_file();
    let result = execute_search(SearchArgs {
        input: input.path().to_path_buf(),
        query: String::new(),
        case_sensitive: false,
    });
    assert!(result.is_err());
}

#[test]
fn test_select_all_command() {
    let input = input_file();
    let leaves = execute_select(SelectArgs {
        input: input.path().to_path_buf(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        leaves,
        vec!["com.acme.api", "com.acme.db", "org.example.Worker"]
    );
}

#[test]
fn test_select_with_exclusion() {
    let input = input_file();
    let leaves = execute_select(SelectArgs {
        input: input.path().to_path_buf(),
        names: vec!["com".to_string(), "does.not.exist".to_string()],
        exclude: vec!["com.acme.db".to_string()],
    })
    .unwrap();
    assert_eq!(leaves, vec!["com.acme.api"]);
}

#[test]
fn test_validate_rejects_tampered_snapshot() {
    let input = input_file();
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("tree.json");

    execute_tree(TreeArgs {
        input: input.path().to_path_buf(),
        output_json: Some(json_path.clone()),
        print_tree: false,
        ..Default::default()
    })
    .unwrap();

    let raw = std::fs::read_to_string(&json_path).unwrap();
    let tampered = raw.replacen("\"total_events\": 5", "\"total_events\": 6", 1);
    assert_ne!(raw, tampered);
    std::fs::write(&json_path, tampered).unwrap();

    assert!(validate_snapshot_file(&json_path).is_err());
}
