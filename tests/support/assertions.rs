//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed:\nstdout: {}\nstderr: {}",
            stdout(output),
            stderr(output)
        );
    }
}

/// Assert that a command exited with status 1.
pub fn assert_failure(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(1),
        "Expected exit status 1, got {:?}\nstdout: {}",
        output.status.code(),
        stdout(output)
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stdout does NOT contain a string.
pub fn assert_stdout_excludes(output: &Output, excluded: &str) {
    let out = stdout(output);
    assert!(
        !out.contains(excluded),
        "stdout should not contain '{}', got: {}",
        excluded,
        out
    );
}

/// Operations recorded by the fake store, e.g. `["describe", "create"]`.
pub fn store_ops(t: &super::Test) -> Vec<String> {
    store_json(t)["calls"]
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .filter_map(|c| c["op"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Raw fake store contents, `Null` if the store was never opened.
pub fn store_json(t: &super::Test) -> serde_json::Value {
    match std::fs::read(t.store_path()) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("store file is not JSON"),
        Err(_) => serde_json::Value::Null,
    }
}

/// Payload bytes stored for `name`, if any.
pub fn stored_payload(t: &super::Test, name: &str) -> Option<Vec<u8>> {
    let payload = store_json(t)["secrets"][name]["payload"].as_array()?.clone();
    Some(
        payload
            .iter()
            .map(|b| b.as_u64().expect("payload byte") as u8)
            .collect(),
    )
}
