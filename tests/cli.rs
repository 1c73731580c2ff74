use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn daylog_cmd() -> Command {
    let binary = assert_cmd::cargo::cargo_bin!("daylog");
    Command::new(binary)
}

/// The active target for today, as the binary itself reports it.
fn todays_target(dir: &Path) -> String {
    let output = daylog_cmd()
        .arg("path")
        .arg("--dir")
        .arg(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn path_prints_a_log_file_name() {
    let temp = tempdir().unwrap();

    let target = todays_target(temp.path());
    let name = Path::new(&target).file_name().unwrap().to_string_lossy();

    assert!(name.ends_with(".txt"));
    assert!(name == "weekend.txt" || (name.starts_with("log") && name.len() == "log20220311.txt".len()));
}

#[test]
fn write_appends_to_the_reported_target() {
    let temp = tempdir().unwrap();
    let target = todays_target(temp.path());

    daylog_cmd()
        .arg("write")
        .arg("deploy finished")
        .arg("--dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(contains("Appended to:"));

    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "deploy finished\n");
}

#[test]
fn repeated_writes_accumulate_in_order() {
    let temp = tempdir().unwrap();
    let target = todays_target(temp.path());

    for message in ["first entry", "second entry", "third entry"] {
        daylog_cmd()
            .arg("write")
            .arg(message)
            .arg("--dir")
            .arg(temp.path())
            .assert()
            .success();
    }

    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "first entry\nsecond entry\nthird entry\n");
}

#[test]
fn write_without_lock_still_appends() {
    let temp = tempdir().unwrap();
    let target = todays_target(temp.path());

    daylog_cmd()
        .arg("write")
        .arg("unlocked entry")
        .arg("--dir")
        .arg(temp.path())
        .arg("--no-lock")
        .assert()
        .success();

    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "unlocked entry\n");
}

#[test]
fn list_shows_the_active_log_after_a_write() {
    let temp = tempdir().unwrap();
    let target = todays_target(temp.path());
    let name = Path::new(&target)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    daylog_cmd()
        .arg("write")
        .arg("listed entry")
        .arg("--dir")
        .arg(temp.path())
        .assert()
        .success();

    daylog_cmd()
        .arg("list")
        .arg("--dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(contains(name));
}

#[test]
fn list_of_empty_directory_reports_no_logs() {
    let temp = tempdir().unwrap();

    daylog_cmd()
        .arg("list")
        .arg("--dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(contains("No log files"));
}

#[test]
fn config_file_dir_is_honored() {
    let temp = tempdir().unwrap();
    let workdir = temp.path();

    fs::write(workdir.join("daylog.toml"), "dir = \"logs\"\n").unwrap();

    daylog_cmd()
        .arg("write")
        .arg("configured entry")
        .current_dir(workdir)
        .assert()
        .success();

    let target = todays_target(&workdir.join("logs"));
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "configured entry\n");
}

#[test]
fn cli_dir_overrides_config_file() {
    let temp = tempdir().unwrap();
    let workdir = temp.path();

    fs::write(workdir.join("daylog.toml"), "dir = \"logs\"\n").unwrap();

    daylog_cmd()
        .arg("write")
        .arg("explicit dir entry")
        .arg("--dir")
        .arg("elsewhere")
        .current_dir(workdir)
        .assert()
        .success();

    let target = todays_target(&workdir.join("elsewhere"));
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "explicit dir entry\n");

    assert!(!workdir.join("logs").exists());
}
