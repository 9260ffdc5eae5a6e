use assert_cmd::cargo;
use assert_cmd::prelude::*;
use nocap_test::{read_shared_resource, shared_resource_path};
use predicates::prelude::*;
use std::{path::PathBuf, process::Command};
use tempfile::NamedTempFile;

pub fn path_to_test_resource(name: &'static str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources");
    path.push("test");
    path.push(name);
    path
}

fn nocapc() -> Command {
    Command::new(cargo::cargo_bin!("nocapc"))
}

#[test]
fn check_when_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("[Error] Unable to read"));

    Ok(())
}

#[test]
fn check_when_trace_log_and_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("check")
        .arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("[Error]"));

    Ok(())
}

#[test]
fn check_when_too_verbose_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("-vvvvv").arg("check").arg(shared_resource_path("fibonacci.nc"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Don't be crazy with verbose"));

    Ok(())
}

#[test]
fn check_when_valid_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("fibonacci.nc"));
    cmd.assert().success().stdout("OK\n");

    Ok(())
}

#[test]
fn check_when_slang_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("slang.nc"));
    cmd.assert().success().stdout("OK\n");

    Ok(())
}

#[test]
fn check_when_crlf_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(path_to_test_resource("crlf.nc"));
    cmd.assert().success().stdout("OK\n");

    Ok(())
}

#[test]
fn check_when_valid_file_latin1_encoded_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("latin1.nc"));
    cmd.assert().success().stdout("OK\n");

    Ok(())
}

#[test]
fn check_when_binary_file_then_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("binary.nc"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("[Error] Unknown token"));

    Ok(())
}

#[test]
fn check_when_syntax_error_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("syntax_error.nc"));
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr("[Error] Expected comparison operator at: THEN\n");

    Ok(())
}

#[test]
fn check_when_semantic_error_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check").arg(shared_resource_path("semantic_error.nc"));
    cmd.assert().failure().stderr(predicate::str::contains(
        "[Error] Attempting to GOTO to undeclared label: missing",
    ));

    Ok(())
}

#[test]
fn check_when_annotate_then_shows_code_and_source() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("check")
        .arg("--annotate")
        .arg(path_to_test_resource("duplicate_label.nc"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0006"))
        .stderr(predicate::str::contains("First declared here"))
        .stderr(predicate::str::contains("[Error] Label already exists: top"));

    Ok(())
}

#[test]
fn compile_when_valid_file_then_creates_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = NamedTempFile::new()?;
    let mut cmd = nocapc();

    cmd.arg("compile")
        .arg(shared_resource_path("fibonacci.nc"))
        .arg("--output")
        .arg(output.path());
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(output.path())?;
    assert_eq!(read_shared_resource("fibonacci.c"), written);

    Ok(())
}

#[test]
fn compile_when_short_output_flag_then_creates_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = NamedTempFile::new()?;
    let mut cmd = nocapc();

    cmd.arg("compile")
        .arg(shared_resource_path("labels.nc"))
        .arg("-o")
        .arg(output.path());
    cmd.assert().success();

    let written = std::fs::read_to_string(output.path())?;
    assert!(written.contains("goto start;\n"));
    assert!(written.contains("finish:\n"));

    Ok(())
}

#[test]
fn compile_when_no_output_flag_then_writes_out_c() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = nocapc();

    cmd.current_dir(dir.path())
        .arg("compile")
        .arg(shared_resource_path("fibonacci.nc"));
    cmd.assert().success();

    assert!(dir.path().join("out.c").metadata()?.len() > 0);

    Ok(())
}

#[test]
fn compile_when_error_then_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("never.c");
    let mut cmd = nocapc();

    cmd.arg("compile")
        .arg(shared_resource_path("syntax_error.nc"))
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Expected comparison operator"));

    assert!(!output.exists());

    Ok(())
}

#[test]
fn compile_when_output_not_writable_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("compile")
        .arg(shared_resource_path("fibonacci.nc"))
        .arg("--output")
        .arg("test/dir/doesnt/exist/out.c");
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("[Error]"));

    Ok(())
}

#[test]
fn tokenize_when_valid_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("tokenize").arg(shared_resource_path("labels.nc"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Type: GOTO, Value: 'GOTO', At: Ln 1,Col 0",
        ))
        .stdout(predicate::str::contains(
            "Type: STRING, Value: 'back again', At: Ln 4,Col 4",
        ));

    Ok(())
}

#[test]
fn tokenize_when_json_then_array_of_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let output = nocapc()
        .arg("tokenize")
        .arg("--json")
        .arg(shared_resource_path("labels.nc"))
        .output()?;
    assert!(output.status.success());

    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let first = &tokens[1];
    assert_eq!("GOTO", first["type"]);
    assert_eq!("GOTO", first["text"]);
    assert_eq!(1, first["line"]);

    Ok(())
}

#[test]
fn version_when_called_then_prints_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = nocapc();

    cmd.arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("nocapc version "));

    Ok(())
}
