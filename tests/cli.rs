//! CLI smoke tests (§6.1): spawn the built binary against a real file on
//! disk. Unlike the library-level tests, a file path here is a process
//! argument, not Kaynat source text, so it is free to contain the slashes
//! and dots a temp path always has.

use std::io::Write;
use std::process::Command;

fn kaynat_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kaynat"))
}

#[test]
fn running_a_kaynat_file_prints_its_output_and_exits_zero() {
    let mut file = tempfile::Builder::new().suffix(".kaynat").tempfile().expect("create temp file");
    writeln!(file, "set x to 2 plus 2 .\nsay x .\n").expect("write source");

    let output = kaynat_bin().arg(file.path()).output().expect("run kaynat binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "4");
}

#[test]
fn a_runtime_error_exits_non_zero_and_reports_on_stderr() {
    let mut file = tempfile::Builder::new().suffix(".kaynat").tempfile().expect("create temp file");
    writeln!(file, "set x to 1 divided by 0 .\n").expect("write source");

    let output = kaynat_bin().arg(file.path()).output().expect("run kaynat binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ValueError"));
}

#[test]
fn an_unrecognized_extension_warns_on_stderr_but_still_runs() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().expect("create temp file");
    writeln!(file, "say hi .\n").expect("write source");

    let output = kaynat_bin().arg(file.path()).output().expect("run kaynat binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("extension"));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "hi");
}

#[test]
fn a_missing_file_is_a_plain_io_error_exit() {
    let output = kaynat_bin().arg("this-path-does-not-exist.kaynat").output().expect("run kaynat binary");
    assert!(!output.status.success());
}
