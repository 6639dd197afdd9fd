use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn yamlfmt() -> Command {
    Command::cargo_bin("yamlfmt").unwrap()
}

#[test]
fn already_formatted_tree_exits_zero() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("clean.yaml"), "a: 1\nb:\n- x\n").unwrap();

    yamlfmt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no change"))
        .stdout(predicate::str::contains("All files already formatted"));
}

#[test]
fn default_mode_reports_pending_changes_without_failing() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("messy.yaml");
    std::fs::write(&file, "a:     1\n").unwrap();

    yamlfmt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would change"));

    // Nothing was written.
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "a:     1\n");
}

#[test]
fn check_mode_exits_one_when_changes_are_pending() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("messy.yaml"), "a:     1\n").unwrap();

    yamlfmt()
        .arg("--check")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Formatting check failed; files would be changed",
        ));
}

#[test]
fn apply_normalizes_and_backs_up() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("messy.yaml");
    std::fs::write(&file, "a:     1\n").unwrap();

    yamlfmt()
        .arg("--apply")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("applied"))
        .stdout(predicate::str::contains("Formatting applied"));

    assert_eq!(std::fs::read_to_string(&file).unwrap(), "a: 1\n");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("messy.yaml.bak")).unwrap(),
        "a:     1\n"
    );

    // Second pass: nothing left to do.
    yamlfmt()
        .arg("--apply")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no change"));
}

#[test]
fn unparseable_file_exits_two_but_the_batch_continues() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("broken.yaml"), "key: [unclosed\n").unwrap();
    std::fs::write(dir.path().join("clean.yaml"), "a: 1\n").unwrap();

    yamlfmt()
        .arg(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("parse error"))
        .stdout(predicate::str::contains("no change"))
        .stdout(predicate::str::contains("Errors:"));
}

#[test]
fn comment_only_files_are_left_alone() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("comments.yaml");
    std::fs::write(&file, "# just a comment\n\n# another\n").unwrap();

    yamlfmt()
        .arg("--apply")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("comments/blank - skipped"));

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "# just a comment\n\n# another\n"
    );
}

#[test]
fn empty_directory_reports_no_files() {
    let dir = tempdir().unwrap();

    yamlfmt()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No YAML files found"));
}

#[test]
fn explicit_file_arguments_are_formatted_directly() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("one.yml");
    std::fs::write(&file, "x:   2\n").unwrap();

    yamlfmt()
        .arg("--check")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would change"));
}
