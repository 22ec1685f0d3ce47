use serde::Deserialize;
use std::env;

use crate::engine::limits::{DEFAULT_BATCH_ROWS, DEFAULT_MAX_COLUMNS, DEFAULT_MAX_FRAME_BYTES};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub wire: WireConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct WireConfig {
    /// Largest payload accepted or emitted by the frame reader/writer
    pub max_frame_bytes: usize,
    /// Upper bound on columns per batch
    pub max_columns: usize,
    /// Rows per NORMAL batch assembled by `BatchBuffer`
    pub batch_rows: usize,
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("TUPLE_WIRE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Defaults first, then the (optional) file at `config_path` on top.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("wire.max_frame_bytes", DEFAULT_MAX_FRAME_BYTES as i64)?
        .set_default("wire.max_columns", DEFAULT_MAX_COLUMNS as i64)?
        .set_default("wire.batch_rows", DEFAULT_BATCH_ROWS as i64)?
        .add_source(config::File::with_name(config_path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
