use std::{fs, path::PathBuf};

use tempfile::tempdir;

use bpmm_cli::{Args, Report, run};

fn samples_dir() -> PathBuf {
    // Samples live at the workspace root, not inside the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|crates| crates.parent())
        .expect("workspace root")
        .join("samples")
}

fn args_for(input: PathBuf, output: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.map(|path| path.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_strategy_map_loads_every_element() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("strategy_map.json");

    let report = run(&args_for(
        samples_dir().join("strategy_map.json"),
        Some(output.clone()),
    ))
    .expect("sample document loads");

    assert_eq!(
        report,
        Report {
            loaded: 11,
            skipped: 0
        }
    );

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("output written"))
            .expect("output is JSON");
    let elements = written.as_array().expect("array document");
    assert_eq!(elements.len(), 11);
    assert_eq!(elements[7]["category"].as_i64(), Some(7));
    assert_eq!(elements[7]["enforcement"].as_str(), Some("strict"));
    assert_eq!(elements[10]["text"].as_str(), Some("Review with the board in Q3"));
}

#[test]
fn e2e_bad_entries_are_skipped() {
    let report = run(&args_for(
        samples_dir().join("with_skipped_entries.json"),
        None,
    ))
    .expect("document with bad entries still loads");

    assert_eq!(
        report,
        Report {
            loaded: 2,
            skipped: 2
        }
    );
}

#[test]
fn e2e_invalid_json_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "[{\"category\": 1,").expect("write input");

    let result = run(&args_for(input, None));

    assert!(result.is_err(), "truncated JSON should fail");
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let result = run(&args_for(temp_dir.path().join("absent.json"), None));

    assert!(matches!(result, Err(bpmm::BpmmError::Io(_))));
}
