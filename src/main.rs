// SPDX-License-Identifier: MPL-2.0
use dji_photo_coords::batch;
use dji_photo_coords::config::{self, Config, RunContext};
use dji_photo_coords::export::display_path;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Extract GPS coordinates from drone photos into a CSV table.

Usage: dji-photo-coords [OPTIONS] [INPUT_DIR]

Arguments:
  [INPUT_DIR]           directory to scan (default: current directory)

Options:
  -o, --output FILE     output CSV path (default: settings, then output.csv)
  -c, --config FILE     settings file (default: platform config directory)
  -r, --recursive       scan sub-directories
      --any-case        match .jpg in any letter case
  -v, --verbose         debug logging
  -h, --help            print this help";

#[derive(Debug)]
struct Flags {
    input_dir: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    recursive: bool,
    any_case: bool,
    verbose: bool,
}

#[derive(Debug)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    init_logging(flags.verbose);

    match run(&flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(message)) => {
            eprintln!("{message}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(message)) => {
            error!("{message}");
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}

fn parse_path(value: &OsStr) -> Result<PathBuf, &'static str> {
    Ok(PathBuf::from(value))
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, String> {
    let output = args
        .opt_value_from_os_str(["-o", "--output"], parse_path)
        .map_err(|e| e.to_string())?;
    let config_path = args
        .opt_value_from_os_str(["-c", "--config"], parse_path)
        .map_err(|e| e.to_string())?;
    let recursive = args.contains(["-r", "--recursive"]);
    let any_case = args.contains("--any-case");
    let verbose = args.contains(["-v", "--verbose"]);

    let input_dir = input_dir_from(args.finish())?;

    Ok(Flags {
        input_dir,
        output,
        config_path,
        recursive,
        any_case,
        verbose,
    })
}

fn input_dir_from(remaining: Vec<OsString>) -> Result<PathBuf, String> {
    let mut remaining = remaining.into_iter();
    let input_dir = match remaining.next() {
        None => PathBuf::from("."),
        Some(arg) if arg.to_string_lossy().starts_with('-') => {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }
        Some(arg) => PathBuf::from(arg),
    };
    if let Some(extra) = remaining.next() {
        return Err(format!("unexpected argument: {}", extra.to_string_lossy()));
    }
    Ok(input_dir)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, CommandError> {
    match path {
        Some(path) => config::load_from_path(path).map_err(|e| {
            CommandError::Usage(format!("cannot read settings {}: {}", path.display(), e))
        }),
        None => Ok(config::load().unwrap_or_else(|e| {
            warn!("Falling back to default settings: {e}");
            Config::default()
        })),
    }
}

/// Loads settings, applies command-line overrides and resolves the run.
fn resolve_context(flags: &Flags) -> Result<RunContext, CommandError> {
    let mut config = load_config(flags.config_path.as_deref())?;
    if flags.recursive {
        config.recursive = Some(true);
    }
    if flags.any_case {
        config.match_any_case = Some(true);
    }

    Ok(RunContext::resolve(
        flags.input_dir.clone(),
        flags.output.clone(),
        &config,
    ))
}

fn run(flags: &Flags) -> Result<(), CommandError> {
    let context = resolve_context(flags)?;
    let report = batch::run(&context).map_err(|e| CommandError::Runtime(e.to_string()))?;

    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.file_name, skipped.reason);
    }
    println!(
        "Found {} image(s), wrote {} row(s)",
        report.images_found, report.rows_written
    );
    println!(
        "All finished! Output written to {}",
        display_path(&context.output_path).display()
    );
    Ok(())
}
