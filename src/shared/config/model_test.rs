use super::model::load_settings_from;
use crate::engine::limits::{DEFAULT_MAX_COLUMNS, DEFAULT_MAX_FRAME_BYTES, WireLimits};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent");
    let settings = load_settings_from(path.to_str().unwrap()).expect("defaults load");

    assert_eq!(settings.wire.max_frame_bytes, DEFAULT_MAX_FRAME_BYTES);
    assert_eq!(settings.wire.max_columns, DEFAULT_MAX_COLUMNS);
    assert_eq!(settings.wire.batch_rows, 100);
    assert_eq!(settings.logging.stdout_level, "info");
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wire.toml");
    fs::write(
        &path,
        "[wire]\nmax_frame_bytes = 4096\nbatch_rows = 7\n\n[logging]\nstdout_level = \"warn\"\n",
    )
    .unwrap();

    let settings = load_settings_from(path.to_str().unwrap()).expect("file load");
    assert_eq!(settings.wire.max_frame_bytes, 4096);
    assert_eq!(settings.wire.batch_rows, 7);
    assert_eq!(settings.wire.max_columns, DEFAULT_MAX_COLUMNS);
    assert_eq!(settings.logging.stdout_level, "warn");
    assert_eq!(settings.logging.file_level, "debug");

    let limits = WireLimits::from_settings(&settings.wire);
    assert_eq!(limits.max_frame_bytes, 4096);
    assert_eq!(limits.batch_rows, 7);
}
