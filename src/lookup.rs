//! Discovery of per-locale `strings.xml` files under a resources directory.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    catalog::Catalog,
    error::Error,
    strings_xml::Format,
    traits::Parser,
    types::ResourceContainer,
};

pub const VALUES_DIR_NAME: &str = "values";
pub const STRINGS_FILE_NAME: &str = "strings.xml";

/// Resolves a resource directory name to an accepted locale code.
///
/// - `values` maps to `default_locale` when it is given and accepted.
/// - `values-<qualifiers>` maps to the first accepted candidate among the
///   Android `lang-rREGION` pair (`values-pt-rBR` → `pt-BR`) and the plain
///   qualifiers in order (`values-pt-rBR` → `pt`).
pub fn locale_for_dir_name(
    name: &str,
    supported: &BTreeSet<String>,
    default_locale: Option<&str>,
) -> Option<String> {
    let mut parts = name.split('-');
    if parts.next()? != VALUES_DIR_NAME {
        return None;
    }
    let qualifiers: Vec<&str> = parts.collect();
    if qualifiers.is_empty() {
        return default_locale
            .filter(|locale| supported.contains(*locale))
            .map(str::to_string);
    }

    let mut candidates = Vec::new();
    if let [lang, region, ..] = qualifiers.as_slice()
        && let Some(region) = region.strip_prefix('r')
        && !region.is_empty()
    {
        candidates.push(format!("{}-{}", lang, region));
    }
    candidates.extend(qualifiers.iter().map(|q| q.to_string()));
    candidates.into_iter().find(|c| supported.contains(c))
}

/// Finds and parses the string resources of every accepted locale.
///
/// Directories that do not resolve to an accepted locale, or that have no
/// `strings.xml`, are skipped. When two directories resolve to the same
/// locale the first one in name order wins.
pub fn find_string_resources<P: AsRef<Path>>(
    resources_dir: P,
    supported: &BTreeSet<String>,
    default_locale: Option<&str>,
) -> Result<Catalog, Error> {
    let resources_dir = resources_dir.as_ref();
    if !resources_dir.exists() {
        return Err(Error::input_error(format!(
            "Resources dir does not exist: {}",
            resources_dir.display()
        )));
    }
    if !resources_dir.is_dir() {
        return Err(Error::input_error(format!(
            "Resources dir is not a directory: {}",
            resources_dir.display()
        )));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(resources_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut containers: Vec<ResourceContainer> = Vec::with_capacity(supported.len());
    for dir in dirs {
        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(locale) = locale_for_dir_name(dir_name, supported, default_locale) else {
            tracing::trace!(dir = dir_name, "not an accepted locale directory");
            continue;
        };
        let strings_file = dir.join(STRINGS_FILE_NAME);
        if !strings_file.is_file() {
            tracing::debug!(dir = dir_name, "no {} found, skipping", STRINGS_FILE_NAME);
            continue;
        }
        if containers.iter().any(|c| c.locale == locale) {
            tracing::warn!(
                dir = dir_name,
                locale = %locale,
                "locale already loaded from another directory, skipping"
            );
            continue;
        }

        let format = Format::read_from(&strings_file)?;
        tracing::debug!(
            locale = %locale,
            resources = format.resources.len(),
            file = %strings_file.display(),
            "parsed string resources"
        );
        containers.push(ResourceContainer::new(locale, format.resources));
    }

    Catalog::new(containers, default_locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_locale_for_plain_qualifier() {
        let s = supported(&["en", "es"]);
        assert_eq!(locale_for_dir_name("values-es", &s, None), Some("es".to_string()));
        assert_eq!(locale_for_dir_name("values-fr", &s, None), None);
        assert_eq!(locale_for_dir_name("drawable-es", &s, None), None);
        assert_eq!(locale_for_dir_name("valuesx-es", &s, None), None);
    }

    #[test]
    fn test_locale_for_base_values_dir() {
        let s = supported(&["en", "es"]);
        assert_eq!(locale_for_dir_name("values", &s, None), None);
        assert_eq!(locale_for_dir_name("values", &s, Some("en")), Some("en".to_string()));
        assert_eq!(locale_for_dir_name("values", &s, Some("fr")), None);
    }

    #[test]
    fn test_locale_for_region_qualifier() {
        assert_eq!(
            locale_for_dir_name("values-pt-rBR", &supported(&["pt-BR", "pt"]), None),
            Some("pt-BR".to_string())
        );
        assert_eq!(
            locale_for_dir_name("values-pt-rBR", &supported(&["pt"]), None),
            Some("pt".to_string())
        );
        assert_eq!(
            locale_for_dir_name("values-night-es", &supported(&["es"]), None),
            Some("es".to_string())
        );
    }

    #[test]
    fn test_missing_resources_dir_is_input_error() {
        let err = find_string_resources("/definitely/not/here", &supported(&["en"]), None)
            .unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }
}
