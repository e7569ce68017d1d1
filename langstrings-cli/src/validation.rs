use unic_langid::LanguageIdentifier;

/// Validate language code format using unic-langid.
///
/// Codes are kept as written (`pt-BR`, not a canonicalized form) because they
/// must match resource directory qualifiers.
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(lang_id) if !lang_id.language.is_empty() => Ok(()),
        _ => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_code() {
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("pt-BR").is_ok());
        assert!(validate_language_code("zh-Hans").is_ok());
        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("not a code").is_err());
        assert!(validate_language_code("123").is_err());
    }
}
