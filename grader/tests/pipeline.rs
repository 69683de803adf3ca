#![cfg(unix)]

use std::fs;
use std::io::{Cursor, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use code_manager::manager::manager::GradingManager;
use grader::cli::Inputs;
use grader::extractor::EntryOutcome;
use grader::pipeline::run_with;
use tempfile::TempDir;
use util::config::AppConfig;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Fails without the scaffold file, otherwise builds an `a.out` that reports
/// the counts in `counts.txt`.
const BUILD_SCRIPT: &str = r#"#!/bin/sh
[ -f harness.txt ] || { echo "scaffold missing" >&2; exit 1; }
read successes failures < counts.txt
cat > a.out <<SCRIPT
#!/bin/sh
printf '<Catch><OverallResults successes="$successes" failures="$failures"/></Catch>' > "\$4"
SCRIPT
chmod +x a.out
"#;

fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn config_for(root: &Path) -> AppConfig {
    AppConfig {
        log_level: "info".into(),
        log_dir: root.join("logs").to_string_lossy().into_owned(),
        log_file: "grader.log".into(),
        log_to_stdout: false,
        submissions_dir: root.join("submissions"),
        scaffold_dir: root.join("given"),
        output_dir: root.join("out"),
        build_program: root.join("build.sh").to_string_lossy().into_owned(),
        build_artifact: "a.out".into(),
        run_timeout_secs: 2,
        build_timeout_secs: None,
        max_uncompressed_size: 1024 * 1024,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_run_writes_gradebook() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_executable(&root.join("build.sh"), BUILD_SCRIPT);
    fs::create_dir_all(root.join("given")).unwrap();
    fs::write(root.join("given").join("harness.txt"), "scaffold").unwrap();

    let bundle = root.join("submissions.zip");
    let abc = zip_bytes(&[("main.cpp", b"int main() {}"), ("counts.txt", b"7 3")]);
    let def = zip_bytes(&[("counts.txt", b"10 0")]);
    fs::write(
        &bundle,
        zip_bytes(&[
            ("doejane_48213_1001_abc2024.zip", &abc),
            ("roerick_48214_1002_def2024-1.zip", &def),
            ("moemia_48215_1003_ghi2024.zip", b"definitely not a zip"),
            ("badname.zip", &def),
            ("notes.txt", b"ignored"),
        ]),
    )
    .unwrap();

    let template = root.join("template.csv");
    fs::write(
        &template,
        "Student,ID,SIS User ID,Section,Lab 2 (5678)\n\
         \"Doe, Jane\",48213,abc2024,CS 101 - 01,85\n\
         Roe Rick,48214,def2024,CS 101 - 02,\n\
         Moe Mia,48215,ghi2024,CS 101 - 01,90\n\
         Zed Zoe,48216,xyz2024,CS 101 - 02,\n",
    )
    .unwrap();

    let config = config_for(root);
    let manager = GradingManager::new(2, config.execution_config());
    let inputs = Inputs {
        submission: bundle,
        template,
    };

    let summary = run_with(&inputs, &config, &manager).await.unwrap();

    assert_eq!(summary.outcomes.len(), 4);
    assert!(summary.outcomes.iter().any(|o| matches!(
        o,
        EntryOutcome::Rejected { entry } if entry == "badname.zip"
    )));
    assert!(summary.outcomes.iter().any(|o| matches!(
        o,
        EntryOutcome::Corrupt { identifier, .. } if identifier == "ghi2024"
    )));

    assert_eq!(summary.registry.len(), 2);
    assert_eq!(summary.registry.score_for("abc2024"), Some(70.0));
    assert_eq!(summary.registry.score_for("def2024"), Some(100.0));
    assert!(root.join("submissions/abc2024/harness.txt").is_file());
    assert!(!root.join("submissions/abc2024.zip").exists());
    assert_eq!(
        fs::read_to_string(root.join("submissions/def2024/grade.txt")).unwrap(),
        "100"
    );

    assert_eq!(summary.gradebook.assignment.id, "5678");
    assert_eq!(summary.gradebook.path, root.join("out").join("grades-5678.csv"));
    let written = fs::read_to_string(&summary.gradebook.path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Student,ID,SIS User ID,Section,Lab 2 (5678)");
    assert_eq!(lines[1], "\"Doe, Jane\",48213,abc2024,CS 101 - 01,85");
    assert_eq!(lines[2], "Roe Rick,48214,def2024,CS 101 - 02,100");
    assert_eq!(lines[3], "Moe Mia,48215,ghi2024,CS 101 - 01,0");
    assert_eq!(lines[4], "Zed Zoe,48216,xyz2024,CS 101 - 02,0");
}

#[tokio::test]
async fn test_missing_bundle_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    let config = config_for(tmp.path());
    let manager = GradingManager::new(1, config.execution_config());
    let inputs = Inputs {
        submission: tmp.path().join("absent.zip"),
        template: tmp.path().join("template.csv"),
    };

    let err = run_with(&inputs, &config, &manager).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to extract submissions"));
}
