//! planet-workflow CLI Entry Point
//!
//! Generates the planet import manifests into a directory.
//!
//! # Usage
//!
//! ```bash
//! # Write planet-*.json into the current directory
//! planet-workflow
//!
//! # Only a couple of regions, into ./manifests
//! planet-workflow --region europe --region asia --output-dir manifests
//!
//! # Settings from a YAML file, prefix overridden
//! planet-workflow --config planet.yaml --prefix alps
//!
//! # Print the combined manifest instead of writing files
//! planet-workflow --print
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use log::{error, info};

use planet_workflow::config::{load_config, GeneratorConfig};
use planet_workflow::manifest::{encode, FsStore, MemoryStore};
use planet_workflow::{Generator, APP_NAME, VERSION};

/// Command-line options parsed from arguments.
///
/// Every option left unset falls back to the configuration file, then to
/// the built-in defaults.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
    regions: Option<Vec<String>>,
    print: bool,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("OpenStreetMap Import Manifest Generator");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: planet-workflow [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config PATH       Load settings from a YAML file");
    println!("  --output-dir PATH   Directory to write manifests into (default: .)");
    println!("  --prefix NAME       Manifest name prefix (default: planet)");
    println!("  --region NAME       Region to include; repeat for several (default: all continents)");
    println!("  --print             Print the combined manifest instead of writing files");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  planet-workflow");
    println!("  planet-workflow --region liechtenstein --output-dir manifests");
    println!("  planet-workflow --config planet.yaml --print");
}

/// Returns the value following the option at `i`.
fn option_value<'a>(args: &'a [String], i: usize, what: &str) -> Result<&'a String, String> {
    args.get(i + 1)
        .ok_or_else(|| format!("{} requires {} argument", args[i], what))
}

/// Parses command-line arguments into CliOptions.
fn parse_arguments(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 1; // Skip program name

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--print" => {
                options.print = true;
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--config" => {
                options.config_path = Some(PathBuf::from(option_value(args, i, "a path")?));
                i += 1;
            }
            "--output-dir" => {
                options.output_dir = Some(PathBuf::from(option_value(args, i, "a path")?));
                i += 1;
            }
            "--prefix" => {
                options.prefix = Some(option_value(args, i, "a name")?.clone());
                i += 1;
            }
            "--region" => {
                let region = option_value(args, i, "a region name")?.clone();
                options.regions.get_or_insert_with(Vec::new).push(region);
                i += 1;
            }
            arg => {
                return Err(format!("Unknown argument: {}", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Builds the run configuration: file (if any), then command-line overrides.
fn resolve_config(options: CliOptions) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut config = match options.config_path {
        Some(ref path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(dir) = options.output_dir {
        config.output_dir = dir;
    }
    if let Some(prefix) = options.prefix {
        config.prefix = prefix;
    }
    if let Some(regions) = options.regions {
        config.regions = regions;
    }

    config.validate()?;
    Ok(config)
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let options = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(options.verbose);

    let print = options.print;
    let config = resolve_config(options)?;

    if print {
        let generator = Generator::new(config, MemoryStore::new());
        let workflow = generator.build()?;
        println!("{}", encode(&workflow)?);
        return Ok(());
    }

    print_banner();
    info!("Regions: {}", config.regions.join(", "));
    info!("Output directory: {}", config.output_dir.display());

    let store = FsStore::create(&config.output_dir).map_err(|e| {
        error!("Cannot prepare output directory: {}", e);
        e
    })?;

    let report = Generator::new(config, store).run()?;

    println!();
    for name in &report.documents {
        println!("  {} {}", "✓".green(), name);
    }
    println!();
    println!(
        "{} manifests, {} tasks across {} regions",
        report.documents.len(),
        report.tasks,
        report.regions
    );

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
