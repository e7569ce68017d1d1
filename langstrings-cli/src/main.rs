use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use langstrings::Error;
use langstrings_cli::{
    FileConfig, Overrides, Settings, debug::run_debug_command, generate::run_generate_command,
    report::run_report_command,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./langstrings.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Where resources are read from.
#[derive(ClapArgs, Debug, Default)]
struct SourceArgs {
    /// Directory holding the values[-<lang>] folders
    #[arg(short, long)]
    resources_dir: Option<PathBuf>,

    /// Supported language codes, comma separated or repeated
    #[arg(short, long = "lang", value_delimiter = ',')]
    languages: Vec<String>,

    /// Locale whose resources are the base set
    #[arg(long)]
    default_locale: Option<String>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the Strings interface and one implementation per locale.
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Kotlin package of the generated sources
        #[arg(short, long = "package")]
        package_name: Option<String>,

        /// use_default or fail_build
        #[arg(long)]
        missing_translation_strategy: Option<String>,

        /// Directory generated sources are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Fully qualified formatting function used by String.format
        #[arg(long)]
        formatter_import: Option<String>,
    },

    /// Report keys that some locales do not translate.
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// console or csv
        #[arg(short, long)]
        output: Option<String>,

        /// Build directory the CSV report is written under
        #[arg(long)]
        build_dir: Option<PathBuf>,
    },

    /// Dump the discovered resources as JSON.
    Debug {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl SourceArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            resources_dir: self.resources_dir,
            languages: self.languages,
            default_locale: self.default_locale,
            ..Overrides::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), Error> {
    let file = FileConfig::discover(args.config.as_deref())?;

    match args.commands {
        Commands::Generate {
            source,
            package_name,
            missing_translation_strategy,
            output_dir,
            formatter_import,
        } => {
            let overrides = Overrides {
                package_name,
                missing_translation_strategy,
                output_dir,
                formatter_import,
                ..source.into_overrides()
            };
            run_generate_command(&Settings::resolve(file, overrides)?)
        }
        Commands::Report {
            source,
            output,
            build_dir,
        } => {
            let overrides = Overrides {
                report_output: output,
                build_dir,
                ..source.into_overrides()
            };
            run_report_command(&Settings::resolve(file, overrides)?)
        }
        Commands::Debug { source, output } => {
            let settings = Settings::resolve(file, source.into_overrides())?;
            run_debug_command(&settings, output.as_deref())
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
