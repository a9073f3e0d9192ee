use clap::{Parser, Subcommand};
use std::any::Any;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "autoconf")]
#[command(
    version,
    about = "Inspect typed configuration sections and their resolution log"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one section as it would be logged on resolution
    Show {
        #[arg(help = "Section name (matched case-insensitively)")]
        section: String,
        #[arg(
            short = 'f',
            long = "file",
            help = "Settings file (.toml or .json), repeatable; defaults to appsettings.* in the working directory"
        )]
        files: Vec<PathBuf>,
        #[arg(long, default_value = "text", help = "Output format: text, json, toml")]
        format: String,
    },

    /// List top-level configuration sections
    Sections {
        #[arg(short = 'f', long = "file", help = "Settings file (.toml or .json), repeatable")]
        files: Vec<PathBuf>,
    },

    /// Show configuration lookup locations
    Path,
}

/// Text carried by a panic payload (`panic!` yields `&str` or `String`)
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string())
}

/// Report panics through the styled error output, then defer to the default hook
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();

        autoconf::cli::Output::new().error(&format!(
            "autoconf panicked{}: {}",
            location,
            panic_message(panic_info.payload())
        ));

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            autoconf::cli::Output::new().error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Show {
            section,
            files,
            format,
        } => {
            autoconf::cli::commands::show::run(&section, &files, &format)?;
        }
        Commands::Sections { files } => {
            autoconf::cli::commands::sections::run(&files)?;
        }
        Commands::Path => {
            autoconf::cli::commands::path::run()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("bad section");
        let formatted: Box<dyn Any + Send> = Box::new(format!("bad {}", 42));
        let other: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(panic_message(literal.as_ref()), "bad section");
        assert_eq!(panic_message(formatted.as_ref()), "bad 42");
        assert_eq!(panic_message(other.as_ref()), "unknown cause");
    }

    #[test]
    fn test_cli_parses_show_with_files() {
        let cli = Cli::parse_from([
            "autoconf", "show", "MyTestConfig", "-f", "a.toml", "-f", "b.json", "--format", "json",
        ]);
        match cli.command {
            Commands::Show { section, files, format } => {
                assert_eq!(section, "MyTestConfig");
                assert_eq!(files, vec![PathBuf::from("a.toml"), PathBuf::from("b.json")]);
                assert_eq!(format, "json");
            }
            _ => panic!("expected show"),
        }
    }
}
