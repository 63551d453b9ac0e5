mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, fmt, replay, CheckArgs, FmtArgs, ReplayArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prooftree CLI - build natural deduction proof trees for LaTeX
#[derive(Parser, Debug)]
#[command(name = "prooftree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of edits and print the resulting markup
    Replay(ReplayArgs),

    /// Normalize a prftree file
    Fmt(FmtArgs),

    /// Check prftree files for markup and brace errors
    Check(CheckArgs),
}

/// Logs go to stderr so stdout carries only markup
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Replay(args) => replay(args, &cwd),
            Command::Fmt(args) => fmt(args, &cwd),
            Command::Check(args) => check(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
