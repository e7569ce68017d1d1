//! The `Catalog`: every discovered locale container for one run, in a stable order.
//!
//! Order rule: the default container comes first, the rest follow sorted by
//! locale code. The default is the configured default locale, or, when none is
//! configured, the container with the most keys (ties go to the lowest locale
//! code). Analysis and generation both rely on this order, so directory
//! enumeration order never leaks into their output.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    error::Error,
    operations::intersect,
    types::{ResourceContainer, StringResource},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    containers: Vec<ResourceContainer>,
}

impl Catalog {
    /// Orders `containers` by the catalog rule.
    ///
    /// Fails with a configuration error when `default_locale` is given but no
    /// container carries it. An empty catalog never fails.
    pub fn new(
        mut containers: Vec<ResourceContainer>,
        default_locale: Option<&str>,
    ) -> Result<Self, Error> {
        containers.sort_by(|a, b| a.locale.cmp(&b.locale));
        if containers.is_empty() {
            return Ok(Catalog { containers });
        }

        let default_index = match default_locale {
            Some(locale) => containers
                .iter()
                .position(|c| c.locale == locale)
                .ok_or_else(|| {
                    Error::configuration_error(format!(
                        "Default locale `{}` has no string resources",
                        locale
                    ))
                })?,
            None => {
                // Sorted ascending, so the first maximum is the lowest locale code.
                let mut best = 0;
                for (index, container) in containers.iter().enumerate() {
                    if container.len() > containers[best].len() {
                        best = index;
                    }
                }
                best
            }
        };
        let default = containers.remove(default_index);
        containers.insert(0, default);

        tracing::debug!(
            default = %containers[0].locale,
            locales = containers.len(),
            "catalog assembled"
        );
        Ok(Catalog { containers })
    }

    pub fn containers(&self) -> &[ResourceContainer] {
        &self.containers
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// The base resource set: canonical key universe and fallback source.
    pub fn default_container(&self) -> Option<&ResourceContainer> {
        self.containers.first()
    }

    pub fn get(&self, locale: &str) -> Option<&ResourceContainer> {
        self.containers.iter().find(|c| c.locale == locale)
    }

    /// Locale codes in catalog order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.containers.iter().map(|c| c.locale.as_str())
    }

    /// Every key found in any container.
    pub fn all_keys(&self) -> BTreeSet<&str> {
        self.containers
            .iter()
            .flat_map(|c| c.resources.keys().map(String::as_str))
            .collect()
    }

    /// Keys translated in every container, with values from the default container.
    pub fn shared_resources(&self) -> BTreeMap<String, StringResource> {
        let mut iter = self.containers.iter();
        let Some(first) = iter.next() else {
            return BTreeMap::new();
        };
        iter.fold(first.resources.clone(), |shared, container| {
            intersect(&shared, &container.resources)
        })
    }
}
