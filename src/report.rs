//! Rendering of missing-translation reports as a console table or a CSV file.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use unicode_width::UnicodeWidthStr;

use crate::{
    analyzer::MissingTranslation, config::ReportOutput, error::Error, types::StringResource,
};

/// CSV location relative to the build directory.
pub const REPORT_DIR: &str = "report/strings";
pub const REPORT_FILE_NAME: &str = "missing_translations.csv";

pub const NO_MISSING_TRANSLATIONS: &str = "No missing translations";

/// The outcome of reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Rendered table, for the caller to print.
    Console(String),
    /// Path of the CSV file written.
    Csv(PathBuf),
}

/// Flattens a resource for display: array values and plural `quantity:value`
/// pairs are joined by `,`.
pub fn resource_value(resource: &StringResource) -> String {
    match resource {
        StringResource::Singular { value, .. } => value.clone(),
        StringResource::Plural(plural) => plural
            .forms()
            .map(|(quantity, value)| format!("{}:{}", quantity, value))
            .collect::<Vec<_>>()
            .join(","),
        StringResource::Array { values } => values.join(","),
    }
}

/// Formats rows as an aligned table. Each column is as wide as its widest
/// cell; cells are separated by one space.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let width = UnicodeWidthStr::width(cell.as_str());
            match widths.get_mut(index) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (index, cell) in row.iter().enumerate() {
            if index > 0 {
                line.push(' ');
            }
            line.push_str(cell);
            if index + 1 < row.len() {
                let padding = widths[index].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
                line.extend(std::iter::repeat_n(' ', padding));
            }
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Console rendering of the analyzer output.
pub fn render_console(missing_translations: &[MissingTranslation]) -> String {
    if missing_translations.is_empty() {
        return NO_MISSING_TRANSLATIONS.to_string();
    }
    let mut rows = vec![vec![
        "Key".to_string(),
        "Type".to_string(),
        "Languages".to_string(),
        "Default".to_string(),
    ]];
    rows.extend(missing_translations.iter().map(|missing| {
        let default = missing.default_resource.as_ref();
        vec![
            missing.key.clone(),
            default.map(StringResource::kind).unwrap_or_default().to_string(),
            join_locales(missing, ", "),
            default.map(resource_value).unwrap_or_default(),
        ]
    }));
    render_table(&rows)
}

/// Writes the CSV report: header `key,type,languages,default`, then one line
/// per missing translation with `languages` and `default` always quoted.
pub fn write_csv<W: Write>(
    missing_translations: &[MissingTranslation],
    writer: W,
) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(["key", "type", "languages", "default"])?;
    for missing in missing_translations {
        let default = missing.default_resource.as_ref();
        wtr.write_record([
            missing.key.clone(),
            default.map(StringResource::kind).unwrap_or_default().to_string(),
            quote(&join_locales(missing, "/")),
            quote(&default.map(resource_value).unwrap_or_default()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders or writes the report. CSV goes to
/// `<build_dir>/report/strings/missing_translations.csv`, replacing any
/// previous report.
pub fn report_missing_translations(
    missing_translations: &[MissingTranslation],
    output: ReportOutput,
    build_dir: &Path,
) -> Result<Report, Error> {
    match output {
        ReportOutput::Console => Ok(Report::Console(render_console(missing_translations))),
        ReportOutput::Csv => {
            let report_dir = build_dir.join(REPORT_DIR);
            fs::create_dir_all(&report_dir)?;
            let path = report_dir.join(REPORT_FILE_NAME);
            let file = File::create(&path)?;
            write_csv(missing_translations, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), rows = missing_translations.len(), "report written");
            Ok(Report::Csv(path))
        }
    }
}

fn join_locales(missing: &MissingTranslation, separator: &str) -> String {
    missing
        .missing_locales
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
