//! Detection of keys that some locales do not translate.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{catalog::Catalog, types::StringResource};

/// A key missing from at least one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTranslation {
    pub key: String,

    /// The resource of the first container, in catalog order, that has the key.
    pub default_resource: Option<StringResource>,

    pub missing_locales: BTreeSet<String>,
}

/// Returns one record per key absent from at least one container, sorted by key.
///
/// Containers are scanned in catalog order, so the default comes from the
/// default locale whenever it has the key.
pub fn find_missing_translations(catalog: &Catalog) -> Vec<MissingTranslation> {
    let mut missing_translations = Vec::new();
    for key in catalog.all_keys() {
        let mut missing_locales = BTreeSet::new();
        let mut default_resource = None;
        for container in catalog.containers() {
            match container.get(key) {
                None => {
                    missing_locales.insert(container.locale.clone());
                }
                Some(resource) => {
                    if default_resource.is_none() {
                        default_resource = Some(resource.clone());
                    }
                }
            }
        }
        if !missing_locales.is_empty() {
            missing_translations.push(MissingTranslation {
                key: key.to_string(),
                default_resource,
                missing_locales,
            });
        }
    }
    tracing::debug!(
        count = missing_translations.len(),
        "missing translations analyzed"
    );
    missing_translations
}
