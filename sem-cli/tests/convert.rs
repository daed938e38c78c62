use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const TITLE_DOC: &str = "= Title =\n\nHello *world*.\n";

#[test]
fn converts_sem_to_html() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.sem");
    fs::write(&input, TITLE_DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(&input)
        .arg("--to")
        .arg("html");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<h1>Title</h1>"))
        .stdout(predicate::str::contains("<strong>world</strong>"));
}

#[test]
fn convert_is_the_implicit_command() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.sem");
    fs::write(&input, TITLE_DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path()).arg(&input).arg("--to").arg("tag");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<heading level=\"1\">"));
}

#[test]
fn html_converts_back_to_sem_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("out.sem");
    fs::write(&input, "<h2>Sub</h2><p>a <b>b</b></p><ul><li>x</li></ul>").unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--to")
        .arg("sem")
        .arg("-o")
        .arg(&output);

    cmd.assert().success();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "== Sub ==\n\na *b*\n\n- x\n"
    );
}

#[test]
fn delta_output_is_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.sem");
    fs::write(&input, TITLE_DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--to")
        .arg("delta");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"ops\""))
        .stdout(predicate::str::contains("\"header\": 1"));
}

#[test]
fn synopsis_length_comes_from_extras() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.sem");
    fs::write(&input, "Hello world\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--to")
        .arg("synopsis")
        .arg("--extra-length")
        .arg("5");

    cmd.assert().success().stdout("Hello…");
}

#[test]
fn unknown_extension_needs_explicit_from() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "text").unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path()).arg(&input).arg("--to").arg("html");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect format"));

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--from")
        .arg("sem")
        .arg("--to")
        .arg("html");
    cmd.assert().success().stdout("<p>text</p>\n");
}

#[test]
fn unknown_target_format_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.sem");
    fs::write(&input, "text").unwrap();

    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path()).arg(&input).arg("--to").arg("rtf");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("rtf"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("sem");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg("missing.sem")
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}
