use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use drawtree_cli::{Args, run};

/// Collects all .mmd files from a directory
fn collect_mmd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("mmd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_mmd_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.drawio",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(demo_path, &output_path)) {
            Ok(()) => {
                let document = fs::read_to_string(&output_path).unwrap();
                assert!(document.starts_with("<?xml"), "{}", demo_path.display());
                assert!(
                    document.contains("</mxGraphModel>"),
                    "{}",
                    demo_path.display()
                );
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_mmd_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.drawio",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} wrote an output file",
            demo_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_failure_keeps_previous_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("site.drawio");
    fs::write(&output_path, "previous").unwrap();

    let input = demos_path().join("errors").join("empty.mmd");
    assert!(run(&args(&input, &output_path)).is_err());

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "previous");
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("missing.mmd");
    let output_path = temp_dir.path().join("out.drawio");

    let result = run(&args(&input, &output_path));

    assert!(matches!(result, Err(drawtree::DrawtreeError::Io(_))));
    assert!(!output_path.exists());
}

#[test]
fn e2e_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[export]\nmxfile_envelope = true\ndiagram_name = \"Sitemap\"\n",
    )
    .unwrap();
    let output_path = temp_dir.path().join("site.drawio");

    let mut args = args(&demos_path().join("site_map.mmd"), &output_path);
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Failed to convert with an explicit config");

    let document = fs::read_to_string(&output_path).unwrap();
    assert!(document.contains("<diagram id=\"drawtree\" name=\"Sitemap\">"));
    assert_eq!(document.matches("vertex=\"1\"").count(), 4);
}
