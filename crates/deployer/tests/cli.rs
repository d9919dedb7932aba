//! Runs the `deployer` binary and checks what it reports at the process
//! boundary. No node is needed: a private key avoids querying accounts and
//! the artifact lookup fails before any request is sent.

use {std::process::Command, tempfile::TempDir};

const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn deployer(artifacts: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deployer"));
    command
        .env_clear()
        .args(["--private-key", PRIVATE_KEY])
        .args(["--node-url", "http://127.0.0.1:9"])
        .arg("--artifacts-path")
        .arg(artifacts.path());
    command
}

#[test]
fn missing_artifact_exits_with_error() {
    let artifacts = TempDir::new().unwrap();

    let output = deployer(&artifacts).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not find a deployable artifact for AccountManager"));
    assert!(stderr.contains("artifact for contract \"AccountManager\" not found"));
}

#[test]
fn logs_never_reach_stdout() {
    let artifacts = TempDir::new().unwrap();

    let output = deployer(&artifacts)
        .args(["--log-filter", "trace"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("running deployer with validated arguments"));
    assert!(!stderr.contains(&PRIVATE_KEY[2..]));
}
