//! All error types for the langstrings crate.
//!
//! These are returned from all fallible operations (discovery, parsing, generation, reporting).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The resources root is missing or is not a directory.
    #[error("input error: {0}")]
    Input(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Raised by the `FailBuild` strategy when a locale lacks a key of the base set.
    #[error("configuration error: missing translation: lang={locale}, key={key}")]
    MissingTranslation { locale: String, key: String },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Creates a new input error.
    pub fn input_error(message: impl Into<String>) -> Self {
        Error::Input(message.into())
    }

    /// Whether this error belongs to the configuration class (bad placeholders,
    /// unknown option names, missing translations under `FailBuild`).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::MissingTranslation { .. }
        )
    }
}
