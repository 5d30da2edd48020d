// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! setup-deno - Main Application
//!
//! Entry point for CI jobs: reads the requested Deno version, installs it
//! through the tool cache and puts it on the PATH of later job steps.
//! Any failure is reported as a workflow error and exits with status 1.

use std::error::Error;
use std::process::exit;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use setup_deno::runner::{
    self, add_path, existing_deno_on_path, path_file, set_failed, version_input,
};
use setup_deno::{Config, HttpFetcher, Installer};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose || runner::debug_enabled());

    if let Err(e) = run(cli) {
        set_failed(&e.to_string());
        exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let Some(version) = cli
        .target_version
        .filter(|v| !v.trim().is_empty())
        .or_else(version_input)
    else {
        return Err("No version specified.".into());
    };

    let temp_dir = cli
        .temp_dir
        .or_else(|| std::env::var_os("RUNNER_TEMPDIRECTORY").map(Into::into));
    let mut config = Config::for_host(cli.tool_cache, temp_dir);
    if let Some(url) = cli.catalog_url {
        config = config.with_catalog_url(url);
    }

    if let Some(existing) = existing_deno_on_path() {
        warn!(
            path = %existing.display(),
            "deno already on PATH; the installed version will take precedence"
        );
    }

    let fetcher = HttpFetcher::new();
    let installation = Installer::new(&config, &fetcher).install(&version)?;

    add_path(&installation.path, path_file().as_deref())?;

    if cli.print_path {
        println!("{}", installation.path.display());
    }

    Ok(())
}
