use std::fs;

use langstrings::{Error, find_string_resources};

use crate::config::Settings;

/// Run the debug command: dump the discovered catalog as JSON.
pub fn run_debug_command(settings: &Settings, output: Option<&str>) -> Result<(), Error> {
    let catalog = find_string_resources(
        &settings.resources_dir,
        &settings.supported_languages,
        settings.default_locale.as_deref(),
    )?;
    let json = serde_json::to_string_pretty(&catalog)?;

    match output {
        Some(output_path) => {
            fs::write(output_path, json)?;
            println!("✅ Debug output written to: {}", output_path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
