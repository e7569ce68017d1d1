//! Options shared by the generator, the reporter and their callers.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    types::{ResourceContainer, StringResource},
};

/// Conventional resources directory of a Kotlin multiplatform module.
pub const DEFAULT_RESOURCES_DIR: &str = "src/commonMain/composeResources";
/// Where generated sources go, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "build/generated/source/strings";
pub const DEFAULT_BUILD_DIR: &str = "build";
/// Formatting function the generated `format` extension delegates to.
pub const DEFAULT_FORMATTER_IMPORT: &str = "net.sergeych.sprintf.sprintf";

/// What generation does when a locale lacks a key of the base resource set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MissingTranslationStrategy {
    /// Substitute the base resource.
    #[default]
    UseDefault,
    /// Fail the run, naming the locale and key.
    FailBuild,
}

impl MissingTranslationStrategy {
    /// Picks the resource generated for `key` in `container`.
    pub fn resolve<'a>(
        self,
        container: &'a ResourceContainer,
        key: &str,
        base: &'a StringResource,
    ) -> Result<&'a StringResource, Error> {
        match (container.get(key), self) {
            (Some(resource), _) => Ok(resource),
            (None, MissingTranslationStrategy::UseDefault) => {
                tracing::debug!(locale = %container.locale, key, "using default resource");
                Ok(base)
            }
            (None, MissingTranslationStrategy::FailBuild) => Err(Error::MissingTranslation {
                locale: container.locale.clone(),
                key: key.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MissingTranslationStrategy::UseDefault => "use_default",
            MissingTranslationStrategy::FailBuild => "fail_build",
        }
    }
}

impl FromStr for MissingTranslationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "usedefault" => Ok(MissingTranslationStrategy::UseDefault),
            "failbuild" => Ok(MissingTranslationStrategy::FailBuild),
            _ => Err(Error::configuration_error(format!(
                "Unknown missing translation strategy: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for MissingTranslationStrategy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MissingTranslationStrategy> for String {
    fn from(value: MissingTranslationStrategy) -> Self {
        value.as_str().to_string()
    }
}

impl Display for MissingTranslationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the missing-translation report goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportOutput {
    #[default]
    Console,
    Csv,
}

impl ReportOutput {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportOutput::Console => "console",
            ReportOutput::Csv => "csv",
        }
    }
}

impl FromStr for ReportOutput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "console" => Ok(ReportOutput::Console),
            "csv" => Ok(ReportOutput::Csv),
            _ => Err(Error::configuration_error(format!(
                "Unknown missing translation report output: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ReportOutput {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportOutput> for String {
    fn from(value: ReportOutput) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ReportOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', '_'], "")
}

/// Inputs of one code generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Kotlin package of every generated file (e.g. `com.example.app`).
    pub package_name: String,
    /// Declared locales; drives the registry in `StringsUtils`.
    pub supported_languages: BTreeSet<String>,
    pub missing_translation_strategy: MissingTranslationStrategy,
    /// Fully qualified formatting function imported by `StringExtensions`.
    pub formatter_import: String,
}

impl GenerateOptions {
    pub fn new(package_name: impl Into<String>, supported_languages: BTreeSet<String>) -> Self {
        Self {
            package_name: package_name.into(),
            supported_languages,
            missing_translation_strategy: MissingTranslationStrategy::default(),
            formatter_import: DEFAULT_FORMATTER_IMPORT.to_string(),
        }
    }

    pub fn with_strategy(mut self, strategy: MissingTranslationStrategy) -> Self {
        self.missing_translation_strategy = strategy;
        self
    }

    pub fn with_formatter_import(mut self, formatter_import: impl Into<String>) -> Self {
        self.formatter_import = formatter_import.into();
        self
    }

    /// Checks the package name and formatter import are dotted identifiers.
    pub fn validate(&self) -> Result<(), Error> {
        if !is_qualified_name(&self.package_name) {
            return Err(Error::configuration_error(format!(
                "Invalid package name: `{}`",
                self.package_name
            )));
        }
        if !is_qualified_name(&self.formatter_import) {
            return Err(Error::configuration_error(format!(
                "Invalid formatter import: `{}`",
                self.formatter_import
            )));
        }
        Ok(())
    }
}

fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
