//! Kotlin code generation from a [`Catalog`].
//!
//! One run produces:
//! - `Strings.kt`: the `Strings` interface with one abstract member per key
//!   of the base resource set,
//! - `<locale>Strings.kt`: an `internal object` implementing it per locale,
//! - `StringExtensions.kt`: the `String.format` helper generated code calls,
//! - `StringsUtils.kt`: the supported language set and per-locale bindings.
//!
//! Every file is rendered in memory before anything is written, so a failed
//! run leaves the output directory untouched. Keys and locales are iterated in
//! sorted order, so identical inputs give byte-identical files.

pub mod kotlin;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use indoc::formatdoc;

use crate::{
    catalog::Catalog,
    config::GenerateOptions,
    error::Error,
    operations::outersect,
    types::{ArgType, Plural, Quantity, ResourceContainer, StringResource},
};
use kotlin::KotlinWriter;

pub const CLASSNAME_STRINGS: &str = "Strings";
pub const EXTENSIONS_FILE_NAME: &str = "StringExtensions";
pub const UTILS_CLASS_NAME: &str = "StringsUtils";

const HEADER: &str = "// Code generated by langstrings. DO NOT EDIT.";

/// One rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory (`com/example/Strings.kt`).
    pub path: PathBuf,
    pub contents: String,
}

/// Renders every source file for `catalog`. Returns no files for an empty catalog.
pub fn render_code(catalog: &Catalog, options: &GenerateOptions) -> Result<Vec<GeneratedFile>, Error> {
    let Some(base) = catalog.default_container() else {
        tracing::info!("no string resources found, nothing to generate");
        return Ok(Vec::new());
    };
    options.validate()?;
    check_identifiers(catalog, base)?;

    let mut files = Vec::with_capacity(catalog.len() + 3);
    files.push(render_strings(options, base, None)?);
    for container in catalog.containers() {
        files.push(render_strings(options, base, Some(container))?);
    }
    files.push(render_extensions(options));
    files.push(render_utils(options, catalog));
    Ok(files)
}

/// Rejects keys that are not Kotlin identifiers and locales whose generated
/// class or binding names collide (`pt-BR` and `pt_BR`).
fn check_identifiers(catalog: &Catalog, base: &ResourceContainer) -> Result<(), Error> {
    if let Some(key) = base.resources.keys().find(|key| !kotlin::is_identifier(key)) {
        return Err(Error::configuration_error(format!(
            "Invalid Kotlin identifier: lang={}, key={}",
            base.locale, key
        )));
    }

    let mut names: BTreeMap<String, &str> = BTreeMap::new();
    for locale in catalog.locales() {
        let class_name = kotlin::locale_identifier(locale);
        let binding = kotlin::registry_name(locale);
        for name in [class_name, binding] {
            if let Some(previous) = names.insert(name.clone(), locale)
                && previous != locale
            {
                return Err(Error::configuration_error(format!(
                    "Locales `{}` and `{}` both generate the identifier `{}`",
                    previous, locale, name
                )));
            }
        }
    }
    Ok(())
}

/// Renders and writes all sources under `output_dir`. Returns the written paths.
pub fn generate_code<P: AsRef<Path>>(
    output_dir: P,
    catalog: &Catalog,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>, Error> {
    let files = render_code(catalog, options)?;
    let output_dir = output_dir.as_ref();
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.contents)?;
        tracing::debug!(path = %path.display(), "generated");
        written.push(path);
    }
    tracing::info!(files = written.len(), dir = %output_dir.display(), "code generated");
    Ok(written)
}

fn file_path(options: &GenerateOptions, name: &str) -> PathBuf {
    let mut path: PathBuf = options.package_name.split('.').collect();
    path.push(format!("{}.kt", name));
    path
}

fn file_preamble(writer: &mut KotlinWriter, options: &GenerateOptions) {
    writer
        .line(HEADER)
        .line(&format!("package {}", options.package_name))
        .blank();
}

/// Renders the interface (`target == None`) or a locale implementation.
fn render_strings(
    options: &GenerateOptions,
    base: &ResourceContainer,
    target: Option<&ResourceContainer>,
) -> Result<GeneratedFile, Error> {
    let name = match target {
        Some(container) => format!(
            "{}{}",
            kotlin::locale_identifier(&container.locale),
            CLASSNAME_STRINGS
        ),
        None => CLASSNAME_STRINGS.to_string(),
    };

    let mut writer = KotlinWriter::new();
    file_preamble(&mut writer, options);
    match target {
        Some(container) => {
            warn_about_extra_keys(base, container);
            writer.begin(&format!("internal object {} : {}", name, CLASSNAME_STRINGS));
        }
        None => {
            writer.begin(&format!("public interface {}", name));
        }
    }

    let locale = target.unwrap_or(base).locale.as_str();
    let is_implementation = target.is_some();
    for (index, (key, base_resource)) in base.resources.iter().enumerate() {
        let resource = match target {
            Some(container) => {
                let resource = options
                    .missing_translation_strategy
                    .resolve(container, key, base_resource)?;
                if resource.arg_types() != base_resource.arg_types() {
                    tracing::warn!(
                        locale = %container.locale,
                        key = %key,
                        "translation placeholders differ from the base resource; keeping the base signature"
                    );
                }
                resource
            }
            None => base_resource,
        };
        if index > 0 {
            writer.blank();
        }
        let member = kotlin::member_name(key);
        // Signatures follow the base resource; the translation only supplies text.
        match (base_resource, resource) {
            (StringResource::Singular { arg_types, .. }, StringResource::Singular { value, .. })
                if arg_types.is_empty() =>
            {
                write_property(&mut writer, &member, value, is_implementation)
            }
            (StringResource::Singular { arg_types, .. }, StringResource::Singular { value, .. }) => {
                write_singular_fun(&mut writer, &member, value, arg_types, is_implementation)
            }
            (StringResource::Plural(base_plural), StringResource::Plural(plural)) => write_plural_fun(
                &mut writer,
                &member,
                plural,
                &base_plural.arg_types,
                is_implementation,
            ),
            (StringResource::Array { .. }, StringResource::Array { values }) => {
                write_array_fun(&mut writer, &member, values, is_implementation)
            }
            _ => {
                return Err(Error::configuration_error(format!(
                    "Resource kind mismatch: lang={}, key={}, expected {}, found {}",
                    locale,
                    key,
                    base_resource.kind(),
                    resource.kind()
                )));
            }
        }
    }
    writer.end();

    Ok(GeneratedFile {
        path: file_path(options, &name),
        contents: writer.finish(),
    })
}

fn warn_about_extra_keys(base: &ResourceContainer, container: &ResourceContainer) {
    let extra: Vec<String> = outersect(&base.resources, &container.resources)
        .into_keys()
        .filter(|key| !base.contains_key(key))
        .collect();
    if !extra.is_empty() {
        tracing::warn!(
            locale = %container.locale,
            keys = %extra.join(", "),
            "keys missing from the base resource set are not generated"
        );
    }
}

fn write_property(writer: &mut KotlinWriter, member: &str, value: &str, is_implementation: bool) {
    if is_implementation {
        writer.line(&format!(
            "override val {}: String = {}",
            member,
            kotlin::string_literal(value)
        ));
    } else {
        writer.line(&format!("public val {}: String", member));
    }
}

fn parameters(args: &[(String, &'static str)]) -> Vec<String> {
    args.iter()
        .map(|(name, type_name)| format!("{}: {}", name, type_name))
        .collect()
}

fn argument_names(args: &[(String, &'static str)]) -> String {
    args.iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_singular_fun(
    writer: &mut KotlinWriter,
    member: &str,
    value: &str,
    arg_types: &[ArgType],
    is_implementation: bool,
) {
    let args = kotlin::args(arg_types);
    let signature = format!("fun {}({}): String", member, parameters(&args).join(", "));
    if is_implementation {
        writer
            .begin(&format!("override {}", signature))
            .line(&format!(
                "return {}.format({})",
                kotlin::string_literal(value),
                argument_names(&args)
            ))
            .end();
    } else {
        writer.line(&format!("public {}", signature));
    }
}

fn write_plural_fun(
    writer: &mut KotlinWriter,
    member: &str,
    plural: &Plural,
    arg_types: &[ArgType],
    is_implementation: bool,
) {
    let args = kotlin::args(arg_types);
    let mut params = vec!["count: Int".to_string()];
    if !is_implementation && arg_types == [ArgType::Decimal] {
        // A lone numeric argument defaults to the count.
        params.push(format!("{}: Int = count", args[0].0));
    } else {
        params.extend(parameters(&args));
    }
    let signature = format!("fun {}({}): String", member, params.join(", "));
    if !is_implementation {
        writer.line(&format!("public {}", signature));
        return;
    }

    writer.begin(&format!("override {}", signature));
    writer.begin("val value = when");
    for (quantity, value) in plural.forms() {
        let condition = match quantity.count_range() {
            Some((low, high)) if low == high => format!("count == {}", low),
            Some((low, high)) => format!("count in {}..{}", low, high),
            None => continue,
        };
        writer.line(&format!("{} -> {}", condition, kotlin::string_literal(value)));
    }
    writer.line(&format!(
        "else -> {}",
        kotlin::string_literal(plural.get(Quantity::Other).unwrap_or_default())
    ));
    writer.end();
    writer.line(&format!("return value.format({})", argument_names(&args)));
    writer.end();
}

fn write_array_fun(writer: &mut KotlinWriter, member: &str, values: &[String], is_implementation: bool) {
    let signature = format!("fun {}(): List<String>", member);
    if !is_implementation {
        writer.line(&format!("public {}", signature));
        return;
    }
    writer.begin(&format!("override {}", signature));
    writer.line(&format!("val list = ArrayList<String>({})", values.len()));
    for value in values {
        writer.line(&format!("list.add({})", kotlin::string_literal(value)));
    }
    writer.line("return list");
    writer.end();
}

fn render_extensions(options: &GenerateOptions) -> GeneratedFile {
    let function = options
        .formatter_import
        .rsplit('.')
        .next()
        .unwrap_or(&options.formatter_import);
    let contents = formatdoc! {"
        {header}
        package {package}

        import {import}

        public fun String.format(vararg args: Any?): String = kotlin.runCatching {{
          this.{function}(*args)
        }}.getOrElse {{ this }}
        ",
        header = HEADER,
        package = options.package_name,
        import = options.formatter_import,
        function = function,
    };
    GeneratedFile {
        path: file_path(options, EXTENSIONS_FILE_NAME),
        contents,
    }
}

fn render_utils(options: &GenerateOptions, catalog: &Catalog) -> GeneratedFile {
    let mut writer = KotlinWriter::new();
    file_preamble(&mut writer, options);
    writer.begin(&format!("internal object {}", UTILS_CLASS_NAME));

    let languages = options
        .supported_languages
        .iter()
        .map(|lang| kotlin::string_literal(lang))
        .collect::<Vec<_>>()
        .join(", ");
    writer.line(&format!(
        "public val supportedLanguages: Set<String> = setOf({})",
        languages
    ));

    let mut bound = Vec::new();
    for lang in &options.supported_languages {
        if catalog.get(lang).is_none() {
            tracing::warn!(locale = %lang, "declared language has no string resources, no binding generated");
            continue;
        }
        let class_name = format!("{}{}", kotlin::locale_identifier(lang), CLASSNAME_STRINGS);
        let binding = kotlin::registry_name(lang);
        writer.blank();
        writer.line(&format!(
            "public val {}: {} = {}",
            binding, class_name, class_name
        ));
        bound.push((lang, binding));
    }

    writer.blank();
    writer.begin(&format!(
        "public fun forLanguage(langCode: String): {}? = when (langCode)",
        CLASSNAME_STRINGS
    ));
    for (lang, binding) in &bound {
        writer.line(&format!("{} -> {}", kotlin::string_literal(lang), binding));
    }
    writer.line("else -> null");
    writer.end();
    writer.end();

    GeneratedFile {
        path: file_path(options, UTILS_CLASS_NAME),
        contents: writer.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingTranslationStrategy;
    use indoc::indoc;
    use std::collections::{BTreeMap, BTreeSet};

    fn singular(value: &str, arg_types: Vec<ArgType>) -> StringResource {
        StringResource::Singular {
            value: value.to_string(),
            arg_types,
        }
    }

    fn container(locale: &str, entries: Vec<(&str, StringResource)>) -> ResourceContainer {
        ResourceContainer::new(
            locale,
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn options(languages: &[&str]) -> GenerateOptions {
        GenerateOptions::new(
            "com.strings.sample",
            languages.iter().map(|l| l.to_string()).collect::<BTreeSet<_>>(),
        )
    }

    fn sample_catalog() -> Catalog {
        let apples = Plural {
            zero: Some("No apples".to_string()),
            one: Some("%1$d apple".to_string()),
            other: Some("%1$d apples".to_string()),
            arg_types: vec![ArgType::Decimal],
            ..Plural::default()
        };
        let en = container(
            "en",
            vec![
                ("app_name", singular("Sample", vec![])),
                ("apples", StringResource::Plural(apples)),
                ("greeting", singular("Hello, %1$s!", vec![ArgType::String])),
                (
                    "planets",
                    StringResource::Array {
                        values: vec!["Mercury".to_string(), "Venus".to_string()],
                    },
                ),
            ],
        );
        let es = container("es", vec![("app_name", singular("Ejemplo", vec![]))]);
        Catalog::new(vec![es, en], Some("en")).unwrap()
    }

    fn file<'a>(files: &'a [GeneratedFile], name: &str) -> &'a str {
        let path = Path::new("com/strings/sample").join(format!("{}.kt", name));
        &files
            .iter()
            .find(|f| f.path == path)
            .unwrap_or_else(|| panic!("{} not generated", name))
            .contents
    }

    #[test]
    fn test_interface_declares_abstract_members() {
        let files = render_code(&sample_catalog(), &options(&["en", "es"])).unwrap();
        assert_eq!(
            file(&files, "Strings"),
            indoc! {"
                // Code generated by langstrings. DO NOT EDIT.
                package com.strings.sample

                public interface Strings {
                  public val app_name: String

                  public fun apples(count: Int, arg1: Int = count): String

                  public fun greeting(arg1: String): String

                  public fun planets(): List<String>
                }
            "}
        );
    }

    #[test]
    fn test_implementation_has_concrete_bodies() {
        let files = render_code(&sample_catalog(), &options(&["en", "es"])).unwrap();
        assert_eq!(
            file(&files, "enStrings"),
            indoc! {r#"
                // Code generated by langstrings. DO NOT EDIT.
                package com.strings.sample

                internal object enStrings : Strings {
                  override val app_name: String = "Sample"

                  override fun apples(count: Int, arg1: Int): String {
                    val value = when {
                      count == 0 -> "No apples"
                      count == 1 -> "%1\$d apple"
                      else -> "%1\$d apples"
                    }
                    return value.format(arg1)
                  }

                  override fun greeting(arg1: String): String {
                    return "Hello, %1\$s!".format(arg1)
                  }

                  override fun planets(): List<String> {
                    val list = ArrayList<String>(2)
                    list.add("Mercury")
                    list.add("Venus")
                    return list
                  }
                }
            "#}
        );
    }

    #[test]
    fn test_use_default_substitutes_base_resource() {
        let files = render_code(&sample_catalog(), &options(&["en", "es"])).unwrap();
        let es = file(&files, "esStrings");
        assert!(es.contains("override val app_name: String = \"Ejemplo\""));
        assert!(es.contains("return \"Hello, %1\\$s!\".format(arg1)"));
    }

    #[test]
    fn test_fail_build_names_locale_and_key() {
        let options =
            options(&["en", "es"]).with_strategy(MissingTranslationStrategy::FailBuild);
        let err = render_code(&sample_catalog(), &options).unwrap_err();
        match err {
            Error::MissingTranslation { locale, key } => {
                assert_eq!(locale, "es");
                assert_eq!(key, "apples");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_utils_binds_generated_locales() {
        let files = render_code(&sample_catalog(), &options(&["es", "en", "fr"])).unwrap();
        assert_eq!(
            file(&files, "StringsUtils"),
            indoc! {r#"
                // Code generated by langstrings. DO NOT EDIT.
                package com.strings.sample

                internal object StringsUtils {
                  public val supportedLanguages: Set<String> = setOf("en", "es", "fr")

                  public val EN: enStrings = enStrings

                  public val ES: esStrings = esStrings

                  public fun forLanguage(langCode: String): Strings? = when (langCode) {
                    "en" -> EN
                    "es" -> ES
                    else -> null
                  }
                }
            "#}
        );
    }

    #[test]
    fn test_extensions_delegate_to_formatter() {
        let files = render_code(
            &sample_catalog(),
            &options(&["en"]).with_formatter_import("com.example.fmt.sprintf"),
        )
        .unwrap();
        assert_eq!(
            file(&files, "StringExtensions"),
            indoc! {"
                // Code generated by langstrings. DO NOT EDIT.
                package com.strings.sample

                import com.example.fmt.sprintf

                public fun String.format(vararg args: Any?): String = kotlin.runCatching {
                  this.sprintf(*args)
                }.getOrElse { this }
            "}
        );
    }

    #[test]
    fn test_plural_with_several_args_has_no_default() {
        let plural = Plural {
            other: Some("%1$s has %2$d songs".to_string()),
            arg_types: vec![ArgType::String, ArgType::Decimal],
            ..Plural::default()
        };
        let catalog = Catalog::new(
            vec![container("en", vec![("songs", StringResource::Plural(plural))])],
            None,
        )
        .unwrap();
        let files = render_code(&catalog, &options(&["en"])).unwrap();
        assert!(
            file(&files, "Strings")
                .contains("public fun songs(count: Int, arg1: String, arg2: Int): String")
        );
        let en = file(&files, "enStrings");
        assert!(en.contains("else -> \"%1\\$s has %2\\$d songs\""));
        assert!(en.contains("return value.format(arg1, arg2)"));
    }

    #[test]
    fn test_empty_catalog_generates_nothing() {
        let files = render_code(&Catalog::default(), &options(&["en"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = render_code(&sample_catalog(), &options(&["en", "es"])).unwrap();
        let second = render_code(&sample_catalog(), &options(&["en", "es"])).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_implementation_keeps_interface_signature_when_translation_drifts() {
        let en_songs = Plural {
            one: Some("%1$d song".to_string()),
            other: Some("%1$d songs".to_string()),
            arg_types: vec![ArgType::Decimal],
            ..Plural::default()
        };
        let es_songs = Plural {
            one: Some("Una canción".to_string()),
            other: Some("%1$d canciones".to_string()),
            arg_types: vec![],
            ..Plural::default()
        };
        let en = container(
            "en",
            vec![
                ("songs", StringResource::Plural(en_songs)),
                ("title", singular("Songs", vec![])),
            ],
        );
        let es = container(
            "es",
            vec![
                ("songs", StringResource::Plural(es_songs)),
                ("title", singular("Canciones de %1$s", vec![ArgType::String])),
            ],
        );
        let catalog = Catalog::new(vec![en, es], Some("en")).unwrap();
        let files = render_code(&catalog, &options(&["en", "es"])).unwrap();

        let interface = file(&files, "Strings");
        assert!(interface.contains("public fun songs(count: Int, arg1: Int = count): String"));
        assert!(interface.contains("public val title: String"));

        let es = file(&files, "esStrings");
        assert!(es.contains("override fun songs(count: Int, arg1: Int): String {"));
        assert!(es.contains("count == 1 -> \"Una canción\""));
        assert!(es.contains("return value.format(arg1)"));
        assert!(es.contains("override val title: String = \"Canciones de %1\\$s\""));
        assert!(!es.contains("fun title("));
    }

    #[test]
    fn test_kind_mismatch_is_configuration_error() {
        let en = container("en", vec![("planets", singular("Planets", vec![]))]);
        let es = container(
            "es",
            vec![(
                "planets",
                StringResource::Array {
                    values: vec!["Mercurio".to_string()],
                },
            )],
        );
        let catalog = Catalog::new(vec![en, es], Some("en")).unwrap();
        let err = render_code(&catalog, &options(&["en", "es"])).unwrap_err();
        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("lang=es"), "{}", message);
        assert!(message.contains("key=planets"), "{}", message);
    }

    #[test]
    fn test_key_that_is_not_an_identifier_is_rejected() {
        let en = container("en", vec![("menu.title", singular("Menu", vec![]))]);
        let catalog = Catalog::new(vec![en], None).unwrap();
        let err = render_code(&catalog, &options(&["en"])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("key=menu.title"));
    }

    #[test]
    fn test_colliding_locale_identifiers_are_rejected() {
        let a = container("pt-BR", vec![("title", singular("Título", vec![]))]);
        let b = container("pt_BR", vec![("title", singular("Título", vec![]))]);
        let catalog = Catalog::new(vec![a, b], None).unwrap();
        let err = render_code(&catalog, &options(&["pt-BR", "pt_BR"])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("pt_BR"));
    }
}
