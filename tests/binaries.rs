use std::fs;
use std::path::Path;
use std::process::Command;

fn run(bin: &str, cwd: &Path) -> std::process::Output {
    Command::new(bin).current_dir(cwd).output().unwrap()
}

fn elapsed_secs(stdout: &str, prefix: &str) -> f64 {
    let line = stdout.trim_end();
    assert!(line.starts_with(prefix), "unexpected output: {:?}", line);
    assert!(line.ends_with(" s"), "unexpected output: {:?}", line);
    line[prefix.len()..line.len() - 2].parse().unwrap()
}

#[test]
fn csv_reader_prints_one_summary_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stop_times.txt"), "a,b\n1,2,3\nx\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_csv_reader"), dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let secs = elapsed_secs(&stdout, "Read 3 lines, 6 cells in ");
    assert!(secs >= 0.0);
}

#[test]
fn csv_reader_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stop_times.txt"), "").unwrap();

    let output = run(env!("CARGO_BIN_EXE_csv_reader"), dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    elapsed_secs(&stdout, "Read 0 lines, 0 cells in ");
}

#[test]
fn line_reader_reads_sibling_fixture() {
    let root = tempfile::tempdir().unwrap();
    let fixture_dir = root.path().join("github/router/test/nyc-gtfs");
    let cwd = root.path().join("work/bench");
    fs::create_dir_all(&fixture_dir).unwrap();
    fs::create_dir_all(&cwd).unwrap();
    fs::write(fixture_dir.join("stop_times.txt"), "ab\ncde\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_line_reader"), &cwd);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    elapsed_secs(&stdout, "Read 2 lines, 7 bytes in ");
}

#[test]
fn missing_file_fails_without_summary() {
    let dir = tempfile::tempdir().unwrap();
    for bin in [
        env!("CARGO_BIN_EXE_csv_reader"),
        env!("CARGO_BIN_EXE_line_reader"),
    ]
    .iter()
    {
        let output = run(bin, dir.path());
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn malformed_csv_fails_without_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stop_times.txt"), "a,\"unterminated\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_csv_reader"), dir.path());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
