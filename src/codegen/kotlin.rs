//! Small Kotlin source builder: literals, identifiers and indented blocks.

use crate::types::ArgType;

const INDENT: &str = "  ";

const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// A double-quoted Kotlin string literal. `$` is escaped so resource text is
/// never read as a string template.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Member name for a resource key; hard keywords are backticked.
pub fn member_name(key: &str) -> String {
    if HARD_KEYWORDS.contains(&key) {
        format!("`{}`", key)
    } else {
        key.to_string()
    }
}

/// Whether `name` can be used as a Kotlin identifier (backticks aside).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Identifier-safe form of a locale code (`pt-BR` → `pt_BR`).
pub fn locale_identifier(locale: &str) -> String {
    locale
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Registry binding name for a locale (`pt-BR` → `PT_BR`).
pub fn registry_name(locale: &str) -> String {
    locale_identifier(locale).to_ascii_uppercase()
}

pub fn type_name(arg_type: ArgType) -> &'static str {
    match arg_type {
        ArgType::Decimal => "Int",
        ArgType::String => "String",
    }
}

/// Names and Kotlin types of the positional arguments (`arg1`, `arg2`, ...).
pub fn args(arg_types: &[ArgType]) -> Vec<(String, &'static str)> {
    arg_types
        .iter()
        .enumerate()
        .map(|(index, arg_type)| (format!("arg{}", index + 1), type_name(*arg_type)))
        .collect()
}

/// Accumulates Kotlin source with two-space indentation.
#[derive(Debug, Default)]
pub struct KotlinWriter {
    out: String,
    depth: usize,
}

impl KotlinWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Writes `header` followed by ` {` and indents.
    pub fn begin(&mut self, header: &str) -> &mut Self {
        self.line(&format!("{} {{", header));
        self.depth += 1;
        self
    }

    /// Dedents and closes the block opened by [`KotlinWriter::begin`].
    pub fn end(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    pub fn finish(self) -> String {
        self.out
    }
}
