use langstrings::{
    Error, Report, find_missing_translations, find_string_resources, report_missing_translations,
};

use crate::config::Settings;

/// Run the report command: print or write the missing-translation report.
pub fn run_report_command(settings: &Settings) -> Result<(), Error> {
    let catalog = find_string_resources(
        &settings.resources_dir,
        &settings.supported_languages,
        settings.default_locale.as_deref(),
    )?;
    let missing = find_missing_translations(&catalog);
    match report_missing_translations(&missing, settings.report_output, &settings.build_dir)? {
        Report::Console(table) => println!("{}", table.trim_end()),
        Report::Csv(path) => println!(
            "✅ {} missing translations written to: {}",
            missing.len(),
            path.display()
        ),
    }
    Ok(())
}
