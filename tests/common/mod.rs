//! Shared test helpers for edlist integration tests.
//!
//! CLI tests run the binary in a temp directory with a pinned `utc` zone so
//! date output does not depend on the host zone.

use std::path::Path;
use std::process::{Command, Output};

use edlist::{EducationListPanel, FormDefaults, RecordForm, RootView, ZoneSetting};
use tempfile::TempDir;

/// A temp dir holding an `edlist.toml` with `extra` appended to a utc-zone form.
pub fn setup_config_dir(extra: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = format!("[form]\nzone = \"utc\"\n{extra}");
    std::fs::write(dir.path().join("edlist.toml"), config).expect("failed to write edlist.toml");
    dir
}

/// A fresh page with the built-in seeds and a utc form.
pub fn utc_view() -> RootView {
    let form = RecordForm::new(FormDefaults::default(), ZoneSetting::Utc.offset());
    RootView::new(EducationListPanel::with_form(form))
}

pub fn edlist_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edlist"))
        .args(args)
        .current_dir(dir)
        .env_remove("EDLIST_CONFIG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute edlist")
}

/// Run edlist and assert it succeeds. Returns stdout as string.
pub fn edlist_ok(dir: &Path, args: &[&str]) -> String {
    let out = edlist_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "edlist {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run edlist and assert it fails. Returns stderr as string.
pub fn edlist_fails(dir: &Path, args: &[&str]) -> String {
    let out = edlist_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected edlist {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}
