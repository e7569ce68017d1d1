//! Typed string accessors from Android-style `strings.xml` resources.
//!
//! Reads one `strings.xml` per locale (`values-<locale>/strings.xml`), builds a
//! [`Catalog`], and from it either generates Kotlin sources (one `Strings`
//! interface plus one implementation per locale) or reports the keys that some
//! locales do not translate.
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use langstrings::{GenerateOptions, find_string_resources, generate_code};
//!
//! let languages: BTreeSet<String> = ["en", "es"].iter().map(|s| s.to_string()).collect();
//! let catalog = find_string_resources("src/commonMain/composeResources", &languages, Some("en"))?;
//! let options = GenerateOptions::new("com.example.app", languages);
//! generate_code("build/generated/source/strings", &catalog, &options)?;
//! Ok::<(), langstrings::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod accessor;
pub mod analyzer;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;
pub mod lookup;
pub mod operations;
pub mod placeholder;
pub mod report;
pub mod strings_xml;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    accessor::{AccessorValue, FormatArg, Formatter, PositionalFormatter, evaluate},
    analyzer::{MissingTranslation, find_missing_translations},
    catalog::Catalog,
    codegen::{GeneratedFile, generate_code, render_code},
    config::{GenerateOptions, MissingTranslationStrategy, ReportOutput},
    error::Error,
    lookup::find_string_resources,
    operations::{intersect, outersect},
    report::{Report, report_missing_translations},
    types::{ArgType, Plural, Quantity, ResourceContainer, StringResource},
};
