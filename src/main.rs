//! configr command-line tool
//!
//! Loads cascading configuration scripts and inspects the resulting registry.

use anyhow::{Context, Result};
use clap::Parser;
use configr::cli::{Cli, Command, get};
use configr::config::{AnonymousLookup, Config, ConfigPaths, LoadReport, RegistryOptions};
use configr::format::{EntrySummary, format_entries};
use configr::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::{debug, info};

/// Load the scripts named on the command line, or the discovered defaults.
fn load(cli: &Cli) -> Result<Config> {
    let mut options = RegistryOptions::from_env();
    if cli.first_match {
        options = options.with_anonymous_lookup(AnonymousLookup::FirstRegistered);
    }
    debug!(anonymous_lookup = %options.anonymous_lookup, "Registry options");

    let mut config = Config::new().with_options(options);
    let reports: Vec<LoadReport> = if cli.configs.is_empty() {
        let paths = ConfigPaths::discover();
        config
            .load_defaults(&paths)
            .context("Failed to load default configuration")?
    } else {
        config
            .load_script_files(&cli.configs)
            .context("Failed to load configuration")?
    };

    info!(
        scripts = reports.len(),
        entries = config.registry().len(),
        "Configuration loaded"
    );
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load(&cli)?;

    match cli.command {
        Command::Check => {
            println!("ok: {} entries", config.registry().len());
        }
        Command::List(args) => {
            let entries: Vec<EntrySummary> = config.entries().map(EntrySummary::from).collect();
            let out = format_entries(&entries, args.format)
                .context("Failed to format entries")?;
            print!("{}", out);
            if !matches!(args.format, configr::format::OutputFormat::Text) {
                println!();
            }
        }
        Command::Get(args) => match get::lookup(&config, args.value_type, args.name.as_deref()) {
            Ok(value) => println!("{}", get::render(&value)),
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    run(cli)
}
