//! meson-action CLI - run one Meson build action in CI

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use meson_action::ops::{report_failure, RunOptions};
use meson_action::util::SystemExecutor;

mod cli;

use cli::Cli;

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("meson_action=debug")
        } else {
            EnvFilter::new("meson_action=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let opts = RunOptions {
        config_file: cli.config.as_deref(),
    };

    match meson_action::run(cli.inputs(), &opts, &SystemExecutor) {
        Ok(cmd) => {
            tracing::debug!("Finished `{}`", cmd.display_command());
            Ok(())
        }
        Err(err) => {
            if cli.github_actions {
                report_failure(&mut io::stdout().lock(), &err)
                    .context("failed to write failure report")?;
            }
            Err(err.into())
        }
    }
}
