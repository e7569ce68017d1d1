//! `langstrings.toml` loading and command line overrides.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use langstrings::{
    Error, GenerateOptions, MissingTranslationStrategy, ReportOutput,
    config::{DEFAULT_BUILD_DIR, DEFAULT_FORMATTER_IMPORT, DEFAULT_OUTPUT_DIR, DEFAULT_RESOURCES_DIR},
};
use serde::Deserialize;

use crate::validation::validate_language_code;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "langstrings.toml";

/// Contents of a configuration file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub resources_dir: Option<PathBuf>,
    pub package_name: Option<String>,
    pub supported_languages: Option<Vec<String>>,
    pub default_locale: Option<String>,
    pub missing_translation_strategy: Option<MissingTranslationStrategy>,
    pub report_output: Option<ReportOutput>,
    pub output_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub formatter_import: Option<String>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| Error::configuration_error(format!("Invalid configuration: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::input_error(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    /// Loads `path` when given, else `langstrings.toml` when it exists.
    pub fn discover(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!(file = DEFAULT_CONFIG_FILE, "using configuration file");
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }
}

/// Values given on the command line. They take precedence over the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub resources_dir: Option<PathBuf>,
    pub package_name: Option<String>,
    pub languages: Vec<String>,
    pub default_locale: Option<String>,
    pub missing_translation_strategy: Option<String>,
    pub report_output: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub formatter_import: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub resources_dir: PathBuf,
    pub package_name: Option<String>,
    pub supported_languages: BTreeSet<String>,
    pub default_locale: Option<String>,
    pub missing_translation_strategy: MissingTranslationStrategy,
    pub report_output: ReportOutput,
    pub output_dir: PathBuf,
    pub build_dir: PathBuf,
    pub formatter_import: String,
}

impl Settings {
    /// Merges `overrides` over `file` and validates the result.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, Error> {
        let languages = if overrides.languages.is_empty() {
            file.supported_languages.unwrap_or_default()
        } else {
            overrides.languages
        };
        let mut supported_languages = BTreeSet::new();
        for lang in languages {
            let lang = lang.trim().to_string();
            validate_language_code(&lang).map_err(Error::configuration_error)?;
            supported_languages.insert(lang);
        }
        if supported_languages.is_empty() {
            return Err(Error::configuration_error(
                "No supported languages configured",
            ));
        }

        let default_locale = overrides.default_locale.or(file.default_locale);
        if let Some(locale) = &default_locale
            && !supported_languages.contains(locale)
        {
            return Err(Error::configuration_error(format!(
                "Default locale `{}` is not a supported language",
                locale
            )));
        }

        let missing_translation_strategy = match overrides.missing_translation_strategy {
            Some(name) => name.parse()?,
            None => file.missing_translation_strategy.unwrap_or_default(),
        };
        let report_output = match overrides.report_output {
            Some(name) => name.parse()?,
            None => file.report_output.unwrap_or_default(),
        };

        Ok(Settings {
            resources_dir: overrides
                .resources_dir
                .or(file.resources_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCES_DIR)),
            package_name: overrides.package_name.or(file.package_name),
            supported_languages,
            default_locale,
            missing_translation_strategy,
            report_output,
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            build_dir: overrides
                .build_dir
                .or(file.build_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR)),
            formatter_import: overrides
                .formatter_import
                .or(file.formatter_import)
                .unwrap_or_else(|| DEFAULT_FORMATTER_IMPORT.to_string()),
        })
    }

    /// Generation options; fails when no package name is configured.
    pub fn generate_options(&self) -> Result<GenerateOptions, Error> {
        let package_name = self
            .package_name
            .as_deref()
            .ok_or_else(|| Error::configuration_error("Missing package name"))?;
        let options = GenerateOptions::new(package_name, self.supported_languages.clone())
            .with_strategy(self.missing_translation_strategy)
            .with_formatter_import(self.formatter_import.clone());
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        resources_dir = "res"
        package_name = "com.example.app"
        supported_languages = ["en", "es", "pt-BR"]
        default_locale = "en"
        missing_translation_strategy = "FAIL_BUILD"
        report_output = "csv"
    "#;

    #[test]
    fn test_parse_file_config() {
        let config = FileConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.resources_dir, Some(PathBuf::from("res")));
        assert_eq!(
            config.missing_translation_strategy,
            Some(MissingTranslationStrategy::FailBuild)
        );
        assert_eq!(config.report_output, Some(ReportOutput::Csv));
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = FileConfig::parse("package = \"x\"").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_strategy_in_file_is_rejected() {
        let err = FileConfig::parse("missing_translation_strategy = \"ignore\"").unwrap_err();
        assert!(err.to_string().contains("Unknown missing translation strategy"));
    }

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::resolve(
            FileConfig::default(),
            Overrides {
                languages: vec!["en".to_string()],
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(settings.resources_dir, PathBuf::from(DEFAULT_RESOURCES_DIR));
        assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.build_dir, PathBuf::from(DEFAULT_BUILD_DIR));
        assert_eq!(settings.formatter_import, DEFAULT_FORMATTER_IMPORT);
        assert_eq!(
            settings.missing_translation_strategy,
            MissingTranslationStrategy::UseDefault
        );
        assert_eq!(settings.report_output, ReportOutput::Console);
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::resolve(
            FileConfig::parse(SAMPLE).unwrap(),
            Overrides {
                languages: vec!["en".to_string(), "fr".to_string()],
                missing_translation_strategy: Some("use-default".to_string()),
                report_output: Some("console".to_string()),
                resources_dir: Some(PathBuf::from("other")),
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(settings.resources_dir, PathBuf::from("other"));
        assert_eq!(
            settings.supported_languages.iter().collect::<Vec<_>>(),
            ["en", "fr"]
        );
        assert_eq!(
            settings.missing_translation_strategy,
            MissingTranslationStrategy::UseDefault
        );
        assert_eq!(settings.report_output, ReportOutput::Console);
        assert_eq!(settings.package_name.as_deref(), Some("com.example.app"));
    }

    #[test]
    fn test_invalid_settings() {
        let err = Settings::resolve(FileConfig::default(), Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("No supported languages"));

        let err = Settings::resolve(
            FileConfig::default(),
            Overrides {
                languages: vec!["en".to_string()],
                default_locale: Some("de".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(err.is_configuration());

        let err = Settings::resolve(
            FileConfig::default(),
            Overrides {
                languages: vec!["en".to_string()],
                report_output: Some("html".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown missing translation report output"));
    }

    #[test]
    fn test_generate_options_require_package() {
        let settings = Settings::resolve(
            FileConfig::default(),
            Overrides {
                languages: vec!["en".to_string()],
                ..Overrides::default()
            },
        )
        .unwrap();
        let err = settings.generate_options().unwrap_err();
        assert!(err.to_string().contains("Missing package name"));
    }
}
