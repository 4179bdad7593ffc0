//! Command-line entry point.
//!
//! Mounts the course preview and the school directory, waits for both fetches
//! to settle, applies the criteria given on the command line and prints both
//! listings as text cards.
//!
//! # Usage
//!
//! ```text
//! edu-listing [--config PATH] [--trace] [KEY=VALUE ...]
//!
//!   edu-listing search=jeddah
//!   edu-listing category=technology course_preview_limit=3
//!   edu-listing --config ~/.config/edu-listing.toml api_base_url=http://localhost:8080/api
//!   edu-listing --trace trace_level=debug
//! ```
//!
//! Any [`Config`] field can be given as `KEY=VALUE`; values override those read
//! from `--config`. `--trace` exports spans to the default trace file when no
//! `trace_file` is set. Without `api_base_url` the built-in demo catalogue is
//! used. The process exits non-zero if either listing fails to load.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use edu_listing::{build_source, observability, Config, ListingController, LoadStatus, TextRenderer};
use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "edu-listing", version)]
#[command(about = "Print the course preview and school directory listings")]
struct Cli {
    /// TOML configuration file; `~` expands to the home directory
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Export spans to the default trace file when no `trace_file` is set
    #[arg(long)]
    trace: bool,

    /// Configuration overrides, e.g. `search=jeddah`
    #[arg(value_name = "KEY=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, String)>,
}

fn parse_override(arg: &str) -> std::result::Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))
}

fn load_config(cli: &Cli) -> edu_listing::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(edu_listing::infrastructure::expand_tilde(&path.to_string_lossy()))?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = cli.overrides.iter().cloned().collect();
    let config = base.merge(&overrides);
    Ok(if cli.trace { config.with_default_trace_file() } else { config })
}

async fn run(config: Config) -> edu_listing::Result<bool> {
    let source = build_source(&config);
    let mut courses = ListingController::course_preview(Arc::clone(&source), config.course_preview_limit);
    let mut schools = ListingController::school_directory(source);

    courses.mount()?;
    schools.mount()?;
    courses.settle().await?;
    schools.settle().await?;

    if let Some(category) = &config.category {
        courses.select_category(category.clone())?;
    }
    if let Some(search) = &config.search {
        courses.set_search(search.clone())?;
        schools.set_search(search.clone())?;
    }

    let renderer = TextRenderer::new(72, io::stdout().is_terminal());
    let mut out = io::stdout().lock();
    renderer.render(&courses.view_state(), &mut out)?;
    writeln!(out)?;
    renderer.render(&schools.view_state(), &mut out)?;
    out.flush()?;

    let ok = courses.state().status != LoadStatus::Failed && schools.state().status != LoadStatus::Failed;

    courses.dispose()?;
    schools.dispose()?;
    Ok(ok)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("edu-listing: {e}");
            return ExitCode::from(2);
        }
    };

    observability::init_tracing(&config);
    tracing::debug!(?config, "starting");

    match run(config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "listing run failed");
            ExitCode::FAILURE
        }
    }
}
