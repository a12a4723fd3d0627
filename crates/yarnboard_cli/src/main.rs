//! Command-line entry point for saving and loading boards.
//!
//! # Responsibility
//! - Drive the host API from a terminal, one call per invocation.
//! - Print the response envelope as JSON on stdout.
//!
//! Exit status is 1 when the envelope reports an error; cancellation exits 0.

mod args;
mod chooser;
mod config;

use anyhow::{anyhow, Context, Result};
use args::{Cli, Commands};
use chooser::CliChooser;
use clap::Parser;
use config::{LogSettings, DEBUG_ENV};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use yarnboard_api::{init_logging, load_board, save_board};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    start_logging(&cli)?;

    let ok = match cli.command {
        Commands::Save {
            format,
            input,
            output,
        } => {
            let json_text = read_input(input.as_deref())?;
            let response = save_board(&CliChooser::new(output), &format, &json_text);
            println!("{}", serde_json::to_string_pretty(&response)?);
            response.error.is_none()
        }
        Commands::Load { path, json_only } => {
            let response = load_board(&CliChooser::default(), path_arg(path.as_deref())?);
            match (&response.json, json_only) {
                (Some(json), true) => println!("{json}"),
                _ => println!("{}", serde_json::to_string_pretty(&response)?),
            }
            response.error.is_none()
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn start_logging(cli: &Cli) -> Result<()> {
    let debug_flag = std::env::var(DEBUG_ENV).ok();
    let Some(settings) = LogSettings::resolve(
        cli.log_level.as_deref(),
        cli.log_dir.as_deref(),
        debug_flag.as_deref(),
    )?
    else {
        return Ok(());
    };

    let log_dir = settings.log_dir.display().to_string();
    let error = init_logging(settings.level.as_str(), &log_dir);
    if !error.is_empty() {
        eprintln!("warning: logging disabled: {error}");
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board JSON from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board JSON from stdin")?;
            Ok(text)
        }
    }
}

fn path_arg(path: Option<&Path>) -> Result<Option<&str>> {
    path.map(|path| {
        path.to_str()
            .ok_or_else(|| anyhow!("board path is not valid UTF-8: {}", path.display()))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::path_arg;
    use std::path::Path;

    #[test]
    fn path_arg_passes_utf8_paths_through() {
        assert_eq!(path_arg(None).unwrap(), None);
        assert_eq!(
            path_arg(Some(Path::new("boards/trip.db"))).unwrap(),
            Some("boards/trip.db")
        );
    }

    #[cfg(unix)]
    #[test]
    fn path_arg_rejects_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(&[0x66, 0xff, b'.', b'y', b'b']));
        let err = path_arg(Some(path)).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
