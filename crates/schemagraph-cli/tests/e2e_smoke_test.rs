use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use schemagraph_cli::{Args, OutputFormat, run};

/// Demo sources live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .js and .ts files from a directory
fn collect_sources(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file()
                        && matches!(
                            path.extension().and_then(|s| s.to_str()),
                            Some("js" | "ts")
                        )
                })
                .map(|path| path.to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args(files: Vec<String>, output: &Path, format: OutputFormat) -> Args {
    Args {
        files,
        example: false,
        output: output.to_string_lossy().to_string(),
        format,
        config: None,
        log_level: "off".to_string(),
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("output file written");
    serde_json::from_str(&text).expect("output is valid JSON")
}

fn issue_types(document: &serde_json::Value) -> Vec<String> {
    document["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["type"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn e2e_smoke_test_every_demo() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_sources(&demos_path());
    assert!(!demos.is_empty(), "No demo sources found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let name = Path::new(demo).file_stem().unwrap().to_string_lossy();
        let output = temp_dir.path().join(format!("{name}.json"));
        if let Err(err) = run(&args(vec![demo.clone()], &output, OutputFormat::Export)) {
            failed.push((demo.clone(), err));
        } else {
            read_json(&output);
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("  - {path}: {err}");
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_blog_project_across_files() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("blog.json");
    let files = collect_sources(&demos_path().join("blog"));
    assert_eq!(files.len(), 3);

    run(&args(files, &output, OutputFormat::Export)).unwrap();
    let document = read_json(&output);

    assert_eq!(document["summary"]["totalSchemas"], 6);
    assert_eq!(document["summary"]["totalRelationships"], 10);
    let names: Vec<_> = document["schemas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|schema| schema["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Comment", "Profile", "Post", "Tag", "Address", "User"]);

    let types = issue_types(&document);
    assert!(!types.contains(&"broken-reference".to_string()));
    assert!(types.contains(&"circular-dependency".to_string()));
    assert!(types.contains(&"orphan-risk".to_string()));
    assert!(types.contains(&"cascade-risk".to_string()));
}

#[test]
fn e2e_typescript_demo_reports_broken_references() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("shop.json");
    let shop = demos_path().join("shop.ts").to_string_lossy().to_string();

    run(&args(vec![shop], &output, OutputFormat::Graph)).unwrap();
    let document = read_json(&output);

    let ids: Vec<_> = document["schemas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|schema| schema["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["Variant", "Product", "Order"]);

    let broken: Vec<_> = document["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|issue| issue["category"] == "broken-reference")
        .map(|issue| issue["targetSchema"].as_str().unwrap())
        .collect();
    assert_eq!(broken, ["Vendor", "Customer"]);
}

#[test]
fn e2e_example_layout() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("layout.json");
    let mut args = args(Vec::new(), &output, OutputFormat::Layout);
    args.example = true;

    run(&args).unwrap();
    let document = read_json(&output);

    assert_eq!(document["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(document["edges"].as_array().unwrap().len(), 8);
    assert_eq!(document["edges"][0]["id"], "User-Post-0");
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("never.json");
    let missing = temp_dir.path().join("missing.js").to_string_lossy().to_string();

    assert!(run(&args(vec![missing], &output, OutputFormat::Export)).is_err());
    assert!(!output.exists());
}

#[test]
fn e2e_invalid_config_fails() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[layout]\nnode_spacing = -5.0\n").unwrap();
    let output = temp_dir.path().join("never.json");

    let mut args = args(Vec::new(), &output, OutputFormat::Export);
    args.example = true;
    args.config = Some(config.to_string_lossy().to_string());

    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("node_spacing"));
    assert!(!output.exists());
}
