pub mod global;
pub mod model;

#[cfg(test)]
mod model_test;

pub use global::CONFIG;
pub use model::{LoggingConfig, Settings, WireConfig, load_settings};
