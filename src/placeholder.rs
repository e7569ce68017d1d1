//! Placeholder scanning for resource text.
//!
//! Only positional placeholders are typed: `%<n>$s` is a text argument and
//! `%<n>$d` a numeric one. Escaped percents (`%%`) are skipped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, types::ArgType};

lazy_static! {
    pub(crate) static ref ARG_PATTERN: Regex = Regex::new(r"%%|%([0-9]+)\$([A-Za-z])").unwrap();
}

/// Infers argument types in occurrence order (not by positional index).
///
/// Fails with a configuration error on any suffix other than `s` or `d`.
pub fn arg_types(value: &str) -> Result<Vec<ArgType>, Error> {
    let mut arg_types = Vec::new();
    for caps in ARG_PATTERN.captures_iter(value) {
        let Some(suffix) = caps.get(2) else {
            continue;
        };
        let arg_type = match suffix.as_str() {
            "d" => ArgType::Decimal,
            "s" => ArgType::String,
            _ => {
                return Err(Error::configuration_error(format!(
                    "Unknown argument type: {}",
                    &caps[0]
                )));
            }
        };
        arg_types.push(arg_type);
    }
    Ok(arg_types)
}

/// Removes the resource-file escape for apostrophes (`\'` becomes `'`).
pub fn unescape(value: &str) -> String {
    value.replace("\\'", "'")
}
