//! Testbed CLI - inspect the settings an integration-test session runs with
//!
//! This binary resolves the layered settings files, parses backend
//! descriptors, exports the settings handed to the test process, and replays
//! random seeds.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use testbed_cli::commands;
use testbed_cli::logging::setup_logging;
use testbed_settings::DEFAULT_SETTINGS_FILE_NAME;

/// Testbed - integration-test session settings
#[derive(Parser)]
#[command(name = "testbed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (RUST_LOG overrides this)
    #[arg(long, global = true, default_value = "warn", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the settings cascade and show the backend it selects
    Resolve {
        /// Directory to start searching from (default: current directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Settings file name to look for in each directory
        #[arg(long, default_value = DEFAULT_SETTINGS_FILE_NAME)]
        file_name: String,

        /// Let TESTBED_* environment variables override the files
        #[arg(long)]
        env: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved settings as named resource entries
    Export {
        /// Directory to start searching from (default: current directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Settings file name to look for in each directory
        #[arg(long, default_value = DEFAULT_SETTINGS_FILE_NAME)]
        file_name: String,

        /// Let TESTBED_* environment variables override the files
        #[arg(long)]
        env: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Parse a backend descriptor and show its connection parameters
    Backend {
        /// Descriptor: prod, staging, nightly, emulator[:host][:port], or an http(s) URL
        descriptor: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Resolve a random seed and print the first draws
    Seed {
        /// Seed to use (default: generate one)
        #[arg(short, long, allow_hyphen_values = true)]
        seed: Option<i64>,

        /// Number of draws to print
        #[arg(short, long, default_value_t = 5)]
        count: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Resolve {
            dir,
            file_name,
            env,
            json,
        } => commands::resolve::run(dir.as_deref(), &file_name, env, json),
        Commands::Export {
            dir,
            file_name,
            env,
            json,
        } => commands::export::run(dir.as_deref(), &file_name, env, json),
        Commands::Backend { descriptor, json } => commands::backend::run(&descriptor, json),
        Commands::Seed { seed, count, json } => commands::seed::run(seed, count, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
