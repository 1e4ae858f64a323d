// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `dp` - device-pool dispatcher CLI.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::dispatcher::{DispatcherArgs, RunOnceArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dp", about = "Device-pool test-run dispatcher", version)]
struct Cli {
    /// Directory where application and test files are kept
    #[arg(long, global = true, default_value = "files")]
    files: PathBuf,

    /// Logging level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dispatch loop
    StartDispatcher(DispatcherArgs),

    /// Submit one run for a project, then exit
    RunOnce(RunOnceArgs),

    /// Fetch the bootstrap APK into the files directory, then exit
    DownloadBootstrapApk {
        /// Name to save the APK under (defaults to its upstream name)
        #[arg(long)]
        filename: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Write an empty test zip into the files directory, then exit
    EmptyTestZip {
        #[arg(long, default_value = "empty-test.zip")]
        filename: String,
    },

    /// Summarize the configured device groups, then exit
    Report {
        /// Path to the pool configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// tracing has no CRITICAL; it folds into `error`.
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Critical | LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_thread_names(true)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::StartDispatcher(args) => commands::dispatcher::start(&cli.files, args),
        Command::RunOnce(args) => commands::dispatcher::run_once(&cli.files, args),
        Command::DownloadBootstrapApk { filename, force } => {
            commands::fetch::download_bootstrap_apk(&cli.files, filename.as_deref(), force)
        }
        Command::EmptyTestZip { filename } => commands::fetch::empty_test_zip(&cli.files, &filename),
        Command::Report { config } => commands::report::report(config.as_deref()),
    }
}
