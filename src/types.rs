//! Core types for langstrings.
//! The parser decodes into these; the analyzer, reporter and generator consume them.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::Serialize;

/// Inferred type of a positional format placeholder (`%1$s`, `%2$d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
    Decimal,
    String,
}

/// Plural quantity categories, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Zero,
        Quantity::One,
        Quantity::Two,
        Quantity::Few,
        Quantity::Many,
        Quantity::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }

    /// Returns the inclusive count range that selects this quantity, or `None`
    /// for `Other`, which catches every count the ranges leave unmatched.
    pub fn count_range(self) -> Option<(i32, i32)> {
        match self {
            Quantity::Zero => Some((0, 0)),
            Quantity::One => Some((1, 1)),
            Quantity::Two => Some((2, 2)),
            Quantity::Few => Some((3, 5)),
            Quantity::Many => Some((6, 99)),
            Quantity::Other => None,
        }
    }

    /// The quantity a count falls into when every slot is populated.
    pub fn for_count(count: i32) -> Quantity {
        Quantity::ALL
            .into_iter()
            .find(|q| {
                q.count_range()
                    .is_some_and(|(low, high)| (low..=high).contains(&count))
            })
            .unwrap_or(Quantity::Other)
    }
}

impl FromStr for Quantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Quantity::Zero),
            "one" => Ok(Quantity::One),
            "two" => Ok(Quantity::Two),
            "few" => Ok(Quantity::Few),
            "many" => Ok(Quantity::Many),
            "other" => Ok(Quantity::Other),
            _ => Err(format!("Unknown plural quantity: {}", s)),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All plural forms of a single `<plurals>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plural {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,

    /// Placeholder types of the first populated slot. Every slot is expected
    /// to share them.
    pub arg_types: Vec<ArgType>,
}

impl Plural {
    pub fn get(&self, quantity: Quantity) -> Option<&str> {
        match quantity {
            Quantity::Zero => self.zero.as_deref(),
            Quantity::One => self.one.as_deref(),
            Quantity::Two => self.two.as_deref(),
            Quantity::Few => self.few.as_deref(),
            Quantity::Many => self.many.as_deref(),
            Quantity::Other => self.other.as_deref(),
        }
    }

    pub fn set(&mut self, quantity: Quantity, value: String) {
        let slot = match quantity {
            Quantity::Zero => &mut self.zero,
            Quantity::One => &mut self.one,
            Quantity::Two => &mut self.two,
            Quantity::Few => &mut self.few,
            Quantity::Many => &mut self.many,
            Quantity::Other => &mut self.other,
        };
        *slot = Some(value);
    }

    /// Populated slots in canonical quantity order.
    pub fn forms(&self) -> impl Iterator<Item = (Quantity, &str)> {
        Quantity::ALL
            .into_iter()
            .filter_map(|q| self.get(q).map(|value| (q, value)))
    }

    /// Picks the text for `count`. Ranges of absent slots are skipped, so an
    /// unmatched count resolves to `other`, or to empty text without one.
    pub fn select(&self, count: i32) -> &str {
        self.forms()
            .find(|(q, _)| {
                q.count_range()
                    .is_some_and(|(low, high)| (low..=high).contains(&count))
            })
            .map(|(_, value)| value)
            .or(self.other.as_deref())
            .unwrap_or("")
    }
}

/// A single localizable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StringResource {
    /// `<string>`: one text with positional placeholders.
    Singular {
        value: String,
        arg_types: Vec<ArgType>,
    },

    /// `<plurals>`: text selected by a count.
    Plural(Plural),

    /// `<string-array>`: an ordered list of texts.
    Array { values: Vec<String> },
}

impl StringResource {
    /// Discriminant tag used by reports.
    pub fn kind(&self) -> &'static str {
        match self {
            StringResource::Singular { .. } => "singular",
            StringResource::Plural(_) => "plural",
            StringResource::Array { .. } => "array",
        }
    }

    pub fn arg_types(&self) -> &[ArgType] {
        match self {
            StringResource::Singular { arg_types, .. } => arg_types,
            StringResource::Plural(plural) => &plural.arg_types,
            StringResource::Array { .. } => &[],
        }
    }
}

/// Resources parsed from one locale directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceContainer {
    /// The locale code (e.g. "en", "es").
    pub locale: String,

    pub resources: BTreeMap<String, StringResource>,
}

impl ResourceContainer {
    pub fn new(locale: impl Into<String>, resources: BTreeMap<String, StringResource>) -> Self {
        Self {
            locale: locale.into(),
            resources,
        }
    }

    pub fn get(&self, key: &str) -> Option<&StringResource> {
        self.resources.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_plural() -> Plural {
        let mut plural = Plural::default();
        for q in Quantity::ALL {
            plural.set(q, q.as_str().to_string());
        }
        plural
    }

    #[test]
    fn test_plural_select_with_all_slots() {
        let plural = full_plural();
        assert_eq!(plural.select(0), "zero");
        assert_eq!(plural.select(1), "one");
        assert_eq!(plural.select(2), "two");
        assert_eq!(plural.select(4), "few");
        assert_eq!(plural.select(50), "many");
        assert_eq!(plural.select(1000), "other");
        assert_eq!(plural.select(-3), "other");
    }

    #[test]
    fn test_plural_select_falls_through_to_other() {
        let plural = Plural {
            one: Some("one apple".to_string()),
            other: Some("%1$d apples".to_string()),
            ..Plural::default()
        };
        assert_eq!(plural.select(0), "%1$d apples");
        assert_eq!(plural.select(1), "one apple");
        assert_eq!(plural.select(4), "%1$d apples");
    }

    #[test]
    fn test_plural_select_without_other_is_empty() {
        let plural = Plural {
            one: Some("one".to_string()),
            ..Plural::default()
        };
        assert_eq!(plural.select(7), "");
    }

    #[test]
    fn test_quantity_for_count_matches_select() {
        let plural = full_plural();
        for count in [-1, 0, 1, 2, 3, 5, 6, 99, 100] {
            assert_eq!(plural.select(count), Quantity::for_count(count).as_str());
        }
    }

    #[test]
    fn test_quantity_from_str() {
        assert_eq!("few".parse::<Quantity>(), Ok(Quantity::Few));
        assert!("several".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_plural_forms_skip_absent_slots() {
        let plural = Plural {
            zero: Some("none".to_string()),
            other: Some("some".to_string()),
            ..Plural::default()
        };
        let forms: Vec<_> = plural.forms().collect();
        assert_eq!(
            forms,
            vec![(Quantity::Zero, "none"), (Quantity::Other, "some")]
        );
    }

    #[test]
    fn test_resource_kind() {
        let singular = StringResource::Singular {
            value: "Hi".to_string(),
            arg_types: vec![],
        };
        assert_eq!(singular.kind(), "singular");
        assert_eq!(StringResource::Plural(Plural::default()).kind(), "plural");
        assert_eq!(StringResource::Array { values: vec![] }.kind(), "array");
    }
}
