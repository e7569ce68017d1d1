use langstrings::{Error, find_string_resources, generate_code};

use crate::config::Settings;

/// Run the generate command: discover resources and write Kotlin sources.
pub fn run_generate_command(settings: &Settings) -> Result<(), Error> {
    let options = settings.generate_options()?;
    let catalog = find_string_resources(
        &settings.resources_dir,
        &settings.supported_languages,
        settings.default_locale.as_deref(),
    )?;
    if catalog.is_empty() {
        println!(
            "No string resources found in {}",
            settings.resources_dir.display()
        );
        return Ok(());
    }

    let written = generate_code(&settings.output_dir, &catalog, &options)?;
    println!(
        "✅ Generated {} files for {} locales in {}",
        written.len(),
        catalog.len(),
        settings.output_dir.display()
    );
    Ok(())
}
