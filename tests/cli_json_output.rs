#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

/// Fake runtime that chatters on stdout for every subcommand and succeeds
fn write_chatty_runtime(dir: &Path) -> String {
    let path = dir.join("fake-runtime");
    std::fs::write(&path, "#!/bin/sh\necho \"$1: layer progress...\"\nexit 0\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

#[test]
fn test_json_output_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = write_chatty_runtime(dir.path());
    let config = dir.path().join("config.yaml");
    std::fs::write(
        &config,
        format!(
            "images: [src.io/app:1, src.io/lib/redis:6]\ntarget: dst.io\nruntime: {}\nretry:\n  interval_secs: 0\n",
            runtime
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_image-trans-cli"))
        .arg("-c")
        .arg(&config)
        .args(["-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["successful"], 2);
    assert_eq!(report["successful"][1]["target"], "dst.io/redis:6");

    // the runtime's own output is still shown, on stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("pull: layer progress..."));
    assert!(stderr.contains("push: layer progress..."));
}
