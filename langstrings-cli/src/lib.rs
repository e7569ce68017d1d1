//! CLI library for testing purposes

pub mod config;
pub mod debug;
pub mod generate;
pub mod report;
pub mod validation;

pub use config::{FileConfig, Overrides, Settings};
pub use validation::validate_language_code;
