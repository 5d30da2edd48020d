// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! CI job-runner integration: action inputs, PATH registration, failure reporting

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variables carrying the version input, in priority order
pub const VERSION_INPUTS: [&str; 2] = ["INPUT_VERSION", "INPUT_DENO-VERSION"];

/// Read the version input from the runner environment
///
/// Empty values are treated as absent.
#[must_use]
pub fn version_input() -> Option<String> {
    version_input_from(|name| env::var(name).ok())
}

/// First non-empty version input reported by `lookup`
pub fn version_input_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    VERSION_INPUTS
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Whether the runner asked for step debug logging
#[must_use]
pub fn debug_enabled() -> bool {
    env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1")
}

/// File named by `GITHUB_PATH`, when the runner provides one
#[must_use]
pub fn path_file() -> Option<PathBuf> {
    env::var_os("GITHUB_PATH")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Register `dir` on the PATH of subsequent job steps
///
/// Appends to `path_file` when the runner provides one, otherwise emits the
/// `add-path` workflow command on stdout.
///
/// # Errors
/// Returns error if the path file cannot be appended to
pub fn add_path(dir: &Path, path_file: Option<&Path>) -> io::Result<()> {
    match path_file {
        Some(file) => {
            let mut file = OpenOptions::new().create(true).append(true).open(file)?;
            writeln!(file, "{}", dir.display())?;
        }
        None => println!("{}", add_path_command(dir)),
    }
    Ok(())
}

fn add_path_command(dir: &Path) -> String {
    format!("::add-path::{}", dir.display())
}

/// A `deno` already reachable on PATH, which the installed one will shadow
#[must_use]
pub fn existing_deno_on_path() -> Option<PathBuf> {
    which::which("deno").ok()
}

/// Report a failure the way the runner surfaces it in the job log
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

/// `::error::` workflow command with the message escaped onto one line
#[must_use]
pub fn error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
