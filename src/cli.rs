// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for setup-deno
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parser
#[derive(Parser, Debug)]
#[command(
    name = "setup-deno",
    version,
    about = "Install a Deno release into the CI runner tool cache"
)]
pub struct Cli {
    /// Version to install: exact (1.5.0), range (1.x, ~1.4) or "nightly"
    #[arg(value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Runner tool cache directory
    #[arg(long = "tool-cache", value_name = "DIR", env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// Scratch directory for downloads
    #[arg(long = "temp-dir", value_name = "DIR", env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// Document listing published Deno versions
    #[arg(long = "catalog-url", value_name = "URL", env = "SETUP_DENO_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Print the installed directory on stdout
    #[arg(long = "print-path")]
    pub print_path: bool,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,
}
