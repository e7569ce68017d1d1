//! Rust-side evaluation of the accessors the generator emits.
//!
//! Formatting is an injected capability: anything implementing [`Formatter`]
//! can be plugged in, and [`format_or_original`] gives the same fallback the
//! generated `format` extension has (the template comes back unchanged when
//! formatting fails).

use regex::Captures;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    config::MissingTranslationStrategy,
    error::Error,
    placeholder::ARG_PATTERN,
    types::{ArgType, StringResource},
};

/// A positional formatting argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatArg {
    Text(String),
    Decimal(i64),
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Decimal(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing argument {0}")]
    MissingArgument(usize),

    #[error("argument {index} cannot be formatted as `{conversion}`")]
    TypeMismatch { index: usize, conversion: char },

    #[error("unsupported conversion `{0}`")]
    UnsupportedConversion(char),
}

/// Applies positional arguments to a template.
pub trait Formatter {
    fn format(&self, template: &str, args: &[FormatArg]) -> Result<String, FormatError>;
}

/// Handles `%n$s`, `%n$d` and `%%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalFormatter;

impl Formatter for PositionalFormatter {
    fn format(&self, template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        let mut failure = None;
        let out = ARG_PATTERN.replace_all(template, |caps: &Captures| {
            let (Some(index), Some(conversion)) = (caps.get(1), caps.get(2)) else {
                return "%".to_string();
            };
            let index: usize = index.as_str().parse().unwrap_or(0);
            let conversion = conversion.as_str().chars().next().unwrap_or('?');
            let arg = index.checked_sub(1).and_then(|i| args.get(i));
            match (arg, conversion) {
                (None, _) => {
                    failure.get_or_insert(FormatError::MissingArgument(index));
                    String::new()
                }
                (Some(FormatArg::Text(text)), 's') => text.clone(),
                (Some(FormatArg::Decimal(value)), 's' | 'd') => value.to_string(),
                (Some(FormatArg::Text(_)), 'd') => {
                    failure.get_or_insert(FormatError::TypeMismatch { index, conversion });
                    String::new()
                }
                (Some(_), other) => {
                    failure.get_or_insert(FormatError::UnsupportedConversion(other));
                    String::new()
                }
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(out.into_owned()),
        }
    }
}

/// Formats `template`, returning it unchanged when the formatter fails.
pub fn format_or_original(formatter: &dyn Formatter, template: &str, args: &[FormatArg]) -> String {
    formatter.format(template, args).unwrap_or_else(|err| {
        tracing::debug!(template, %err, "formatting failed, keeping the original text");
        template.to_string()
    })
}

/// The value an accessor produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorValue {
    Text(String),
    List(Vec<String>),
}

/// Evaluates a resource the way its generated accessor does.
///
/// `count` only matters for plurals (missing counts are treated as 0). A
/// plural with at most one numeric placeholder and no explicit arguments uses
/// `count` as that argument, mirroring the generated default parameter. This
/// also covers translations whose slots dropped the placeholder the base
/// resource declares.
pub fn evaluate(
    resource: &StringResource,
    count: Option<i32>,
    args: &[FormatArg],
    formatter: &dyn Formatter,
) -> AccessorValue {
    match resource {
        StringResource::Singular { value, arg_types } => {
            if arg_types.is_empty() {
                AccessorValue::Text(value.clone())
            } else {
                AccessorValue::Text(format_or_original(formatter, value, args))
            }
        }
        StringResource::Plural(plural) => {
            let count = count.unwrap_or_default();
            let value = plural.select(count);
            let defaulted;
            let args = if args.is_empty()
                && matches!(plural.arg_types.as_slice(), [] | [ArgType::Decimal])
            {
                defaulted = [FormatArg::Decimal(i64::from(count))];
                &defaulted[..]
            } else {
                args
            };
            AccessorValue::Text(format_or_original(formatter, value, args))
        }
        StringResource::Array { values } => AccessorValue::List(values.clone()),
    }
}

impl Catalog {
    /// The resource the generated implementation of `locale` returns for
    /// `key`, following the same base-set lookup and strategy as generation.
    ///
    /// Returns `Ok(None)` when the locale is unknown or the key is not part of
    /// the base resource set.
    pub fn accessor(
        &self,
        locale: &str,
        key: &str,
        strategy: MissingTranslationStrategy,
    ) -> Result<Option<&StringResource>, Error> {
        let (Some(container), Some(base)) = (
            self.get(locale),
            self.default_container().and_then(|c| c.get(key)),
        ) else {
            return Ok(None);
        };
        strategy.resolve(container, key, base).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Plural, Quantity};

    #[test]
    fn test_positional_formatter() {
        let out = PositionalFormatter
            .format(
                "%2$d new messages for %1$s (100%%)",
                &["Ana".into(), 3i64.into()],
            )
            .unwrap();
        assert_eq!(out, "3 new messages for Ana (100%)");
    }

    #[test]
    fn test_positional_formatter_errors() {
        assert_eq!(
            PositionalFormatter.format("%2$s", &["a".into()]),
            Err(FormatError::MissingArgument(2))
        );
        assert_eq!(
            PositionalFormatter.format("%1$d", &["a".into()]),
            Err(FormatError::TypeMismatch {
                index: 1,
                conversion: 'd'
            })
        );
    }

    #[test]
    fn test_format_or_original_falls_back() {
        assert_eq!(format_or_original(&PositionalFormatter, "%1$s!", &[]), "%1$s!");
    }

    #[test]
    fn test_evaluate_plural_defaults_argument_to_count() {
        let plural = Plural {
            one: Some("%1$d apple".to_string()),
            other: Some("%1$d apples".to_string()),
            arg_types: vec![ArgType::Decimal],
            ..Plural::default()
        };
        let resource = StringResource::Plural(plural);
        assert_eq!(
            evaluate(&resource, Some(1), &[], &PositionalFormatter),
            AccessorValue::Text("1 apple".to_string())
        );
        assert_eq!(
            evaluate(&resource, Some(7), &[], &PositionalFormatter),
            AccessorValue::Text("7 apples".to_string())
        );
        assert_eq!(
            evaluate(&resource, Some(7), &[FormatArg::Decimal(9)], &PositionalFormatter),
            AccessorValue::Text("9 apples".to_string())
        );
    }

    #[test]
    fn test_evaluate_plural_dispatch() {
        let mut plural = Plural::default();
        for q in Quantity::ALL {
            plural.set(q, q.as_str().to_string());
        }
        let resource = StringResource::Plural(plural);
        for (count, expected) in [
            (0, "zero"),
            (1, "one"),
            (2, "two"),
            (4, "few"),
            (50, "many"),
            (1000, "other"),
        ] {
            assert_eq!(
                evaluate(&resource, Some(count), &[], &PositionalFormatter),
                AccessorValue::Text(expected.to_string())
            );
        }
    }

    #[test]
    fn test_evaluate_singular_and_array() {
        let greeting = StringResource::Singular {
            value: "Hi, %1$s".to_string(),
            arg_types: vec![ArgType::String],
        };
        assert_eq!(
            evaluate(&greeting, None, &["Bo".into()], &PositionalFormatter),
            AccessorValue::Text("Hi, Bo".to_string())
        );
        let plain = StringResource::Singular {
            value: "100%".to_string(),
            arg_types: vec![],
        };
        assert_eq!(
            evaluate(&plain, None, &[], &PositionalFormatter),
            AccessorValue::Text("100%".to_string())
        );
        let array = StringResource::Array {
            values: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(
            evaluate(&array, None, &[], &PositionalFormatter),
            AccessorValue::List(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_evaluate_plural_without_placeholder_in_first_slot() {
        let plural = Plural {
            one: Some("Una canción".to_string()),
            other: Some("%1$d canciones".to_string()),
            arg_types: vec![],
            ..Plural::default()
        };
        let resource = StringResource::Plural(plural);
        assert_eq!(
            evaluate(&resource, Some(1), &[], &PositionalFormatter),
            AccessorValue::Text("Una canción".to_string())
        );
        assert_eq!(
            evaluate(&resource, Some(4), &[], &PositionalFormatter),
            AccessorValue::Text("4 canciones".to_string())
        );
    }
}
