//! CLI contract tests.

use assert_cmd::Command;

fn refconv() -> Command {
    Command::cargo_bin("refconv").unwrap()
}

const RIS_INPUT: &str = "TY  - JOUR\nAU  - Doe, Jane\nTI  - A Study\nJO  - J. Test.\nPY  - 2020//\nER  - \n";

#[test]
fn converts_stdin_ris_to_bibtex() {
    let assert = refconv()
        .args(["-f", "ris", "-t", "bibtex", "--nb"])
        .write_stdin(RIS_INPUT)
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.starts_with("@Article{Doe2020,"), "{out}");
    assert!(out.contains("author=\"Doe, Jane\""));
}

#[test]
fn converts_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refs.ris");
    std::fs::write(&path, RIS_INPUT).unwrap();

    refconv()
        .args(["-f", "ris", "-t", "end", "--nb"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("%0 Journal Article"));
}

#[test]
fn unknown_format_fails_with_one_line() {
    refconv()
        .args(["-f", "klingon", "-t", "bibtex"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicates::str::contains("unknown input format"));
}

#[test]
fn unknown_charset_fails() {
    refconv()
        .args(["-f", "ris", "-t", "bibtex", "-i", "ebcdic-37"])
        .write_stdin(RIS_INPUT)
        .assert()
        .failure()
        .stderr(predicates::str::contains("unknown character set"));
}

#[test]
fn bom_written_by_default_and_skippable() {
    let with_bom = refconv()
        .args(["-f", "ris", "-t", "ris"])
        .write_stdin(RIS_INPUT)
        .assert()
        .success();
    assert!(with_bom.get_output().stdout.starts_with(&[0xEF, 0xBB, 0xBF]));

    let without = refconv()
        .args(["-f", "ris", "-t", "ris", "--nb"])
        .write_stdin(RIS_INPUT)
        .assert()
        .success();
    assert!(without.get_output().stdout.starts_with(b"TY  - "));
}

#[test]
fn latin1_output_narrows_bytes() {
    let input = "TY  - JOUR\nAU  - Doe, Jane\nTI  - caf\u{e9}\nPY  - 2020//\nER  - \n";
    let assert = refconv()
        .args(["-f", "ris", "-t", "ris", "--nb", "-o", "latin1"])
        .write_stdin(input)
        .assert()
        .success();
    let stdout = &assert.get_output().stdout;
    // é must appear as the single latin-1 byte 0xE9
    assert!(stdout.windows(4).any(|w| w == b"caf\xE9"));
}

#[test]
fn version_flag() {
    refconv().arg("--version").assert().success();
}
