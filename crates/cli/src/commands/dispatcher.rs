// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dp start-dispatcher` and `dp run-once`.

use anyhow::{Context, Result};
use clap::Args;
use dp_config::PoolConfig;
use dp_daemon::{env, Lifecycle, Mode, TaskclusterQueue, TestRunManager};
use dp_farm::FarmClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args)]
pub struct DispatcherArgs {
    /// Path to the pool configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds to wait between dispatch ticks
    #[arg(long, default_value_t = 60)]
    pub wait: u64,

    /// Allow the reconciler to create and modify farm entities
    #[arg(long)]
    pub update: bool,
}

#[derive(Args)]
pub struct RunOnceArgs {
    /// Project to submit a run for
    #[arg(long)]
    pub project: String,

    /// Path to the pool configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Allow the reconciler to create and modify farm entities
    #[arg(long)]
    pub update: bool,
}

pub fn start(files_dir: &Path, args: DispatcherArgs) -> Result<()> {
    let (farm, config) = connect_and_load(args.config.as_deref())?;
    let mode = if args.update { Mode::Update } else { Mode::ReadOnly };
    let cache = dp_daemon::configure(&farm, &config, files_dir, mode)?;

    let lifecycle = Lifecycle::new();
    lifecycle.install_signal_handlers()?;
    let queue = TaskclusterQueue::new(env::queue_root())?;

    let manager = Arc::new(TestRunManager::new(
        Arc::new(farm),
        Arc::new(queue),
        Arc::new(cache),
        Arc::new(config),
        lifecycle,
        Duration::from_secs(args.wait),
    ));
    manager.run().context("dispatcher stopped")?;
    Ok(())
}

pub fn run_once(files_dir: &Path, args: RunOnceArgs) -> Result<()> {
    let (farm, config) = connect_and_load(args.config.as_deref())?;
    let mode = if args.update { Mode::Update } else { Mode::ReadOnly };
    let cache = dp_daemon::configure(&farm, &config, files_dir, mode)?;

    let run = dp_daemon::submit_run(&farm, &cache, &config, &args.project)?;
    tracing::info!(project = %args.project, run = run.id, "test run started");
    Ok(())
}

fn connect_and_load(config: Option<&Path>) -> Result<(FarmClient, PoolConfig)> {
    let (url, apikey) = env::farm_credentials()?;
    let farm = FarmClient::new(url, apikey)?;
    let path = super::config_path(config);
    let config = dp_config::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    Ok((farm, config))
}
