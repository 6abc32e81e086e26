/*!
 * End-to-end tests for the srcmerge binary
 */

use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

fn srcmerge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_srcmerge"))
        .args(args)
        .env_remove("SRCMERGE_LOG")
        .output()
        .expect("failed to run srcmerge")
}

#[test]
fn test_merge_to_stdout() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::create_dir_all(root.join("c")).unwrap();
    fs::write(root.join("b").join("x.py"), "1").unwrap();
    fs::write(root.join("c").join("y.py"), "2").unwrap();
    fs::write(root.join("c").join("notes.txt"), "skip").unwrap();

    let output = srcmerge(&["--report", "off", &*root.to_string_lossy()]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\n\n----b/x.py----\n\n1\n\n----c/y.py----\n\n2"
    );
}

#[test]
fn test_merge_to_file_with_exclude() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("keep.py"), "keep\n").unwrap();
    fs::write(root.join("drop.py"), "drop\n").unwrap();
    let out = root.join("out.txt");

    let output = srcmerge(&[
        "--report",
        "json",
        "--exclude",
        &*root.join("drop.py").to_string_lossy(),
        "-o",
        &*out.to_string_lossy(),
        &*root.to_string_lossy(),
    ]);

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "\n\n----keep.py----\n\nkeep\n"
    );
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"files_merged\": 1"));
}

#[test]
fn test_list_prints_sorted_paths() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("b.py"), "").unwrap();
    fs::write(root.join("a.py"), "").unwrap();

    let output = srcmerge(&["--list", &*root.to_string_lossy()]);

    assert!(output.status.success());
    let expected = format!(
        "{}\n{}\n",
        root.join("a.py").display(),
        root.join("b.py").display()
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_empty_input_is_a_notice() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("readme.md"), "# hi").unwrap();

    let output = srcmerge(&[&*temp_dir.path().to_string_lossy()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No files to merge"));
}

#[test]
fn test_unreadable_file_fails_without_output() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.py"), "fine\n").unwrap();
    fs::write(root.join("b.py"), [0xffu8, 0xfe, 0x00]).unwrap();
    let out = root.join("merged.txt");

    let output = srcmerge(&["-o", &*out.to_string_lossy(), &*root.to_string_lossy()]);

    assert!(!output.status.success());
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to read"), "{stderr}");
    assert!(stderr.contains("b.py"), "{stderr}");
    assert!(!stderr.contains("Custom {"), "{stderr}");
}
