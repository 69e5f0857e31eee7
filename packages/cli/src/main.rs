mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, edit, init, new_page, prefs, show, CheckArgs, EditArgs, InitArgs, NewArgs, PrefsArgs,
    ShowArgs,
};

/// Vinyl CLI - page builder for the record store
#[derive(Parser, Debug)]
#[command(name = "vinyl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a Vinyl pages project
    Init(InitArgs),

    /// Create an empty draft page
    New(NewArgs),

    /// Print a page's metadata and sections
    Show(ShowArgs),

    /// Validate page documents
    Check(CheckArgs),

    /// Apply an edit script, then save or publish
    Edit(EditArgs),

    /// Show or update UI preferences
    Prefs(PrefsArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_page(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Edit(args) => edit(args, &cwd).await,
        Command::Prefs(args) => prefs(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
