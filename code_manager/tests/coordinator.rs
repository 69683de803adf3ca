#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use code_manager::coordinator::grade_all;
use code_manager::manager::manager::GradingManager;
use tempfile::TempDir;
use util::execution_config::ExecutionConfig;
use util::registry::{SubmissionRecord, SubmissionRegistry};

/// Builds an `a.out` that reports the pass/fail counts stored in `counts.txt`.
const BUILD_FROM_COUNTS: &str = r#"#!/bin/sh
[ -f counts.txt ] || { echo "no counts.txt" >&2; exit 1; }
read successes failures < counts.txt
cat > a.out <<SCRIPT
#!/bin/sh
printf '<Catch><OverallResults successes="$successes" failures="$failures"/></Catch>' > "\$4"
SCRIPT
chmod +x a.out
"#;

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn add_submission(
    registry: &mut SubmissionRegistry,
    root: &Path,
    identifier: &str,
    counts: Option<&str>,
) {
    let dir = root.join(identifier);
    fs::create_dir_all(&dir).unwrap();
    if let Some(counts) = counts {
        fs::write(dir.join("counts.txt"), counts).unwrap();
    }
    registry.insert(identifier, SubmissionRecord::new("student", "1000", dir));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_submission_is_graded_and_merged() {
    let tmp = TempDir::new().unwrap();
    let build = tmp.path().join("build.sh");
    write_executable(&build, BUILD_FROM_COUNTS);
    let root = tmp.path().join("submissions");

    let mut registry = SubmissionRegistry::new();
    add_submission(&mut registry, &root, "abc2024", Some("7 3"));
    add_submission(&mut registry, &root, "def2024", Some("10 0"));
    add_submission(&mut registry, &root, "ghi2023", None);
    add_submission(&mut registry, &root, "jkl2023", Some("0 0"));
    add_submission(&mut registry, &root, "mno2022", Some("1 3"));

    let config = ExecutionConfig {
        build_program: build.to_string_lossy().into_owned(),
        run_timeout_secs: 2,
        ..ExecutionConfig::default()
    };
    let manager = GradingManager::new(2, config);

    let batch = grade_all(&manager, &mut registry).await;

    assert_eq!(batch.grades.len(), 5);
    let expected = [
        ("abc2024", 70.0),
        ("def2024", 100.0),
        ("ghi2023", 0.0),
        ("jkl2023", 0.0),
        ("mno2022", 25.0),
    ];
    for (identifier, score) in expected {
        assert_eq!(registry.score_for(identifier), Some(score), "{identifier}");
        assert!(batch
            .grades
            .iter()
            .any(|g| g.identifier == identifier && g.score == score));
        assert!(root.join(identifier).join("grade.txt").is_file());
    }
}

#[tokio::test]
async fn test_empty_registry_is_a_no_op() {
    let mut registry = SubmissionRegistry::new();
    let manager = GradingManager::new(4, ExecutionConfig::default());

    let batch = grade_all(&manager, &mut registry).await;

    assert!(batch.grades.is_empty());
    assert!(registry.is_empty());
}
