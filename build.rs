// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)

use std::fs;

use clap::CommandFactory;

include!("src/cli.rs");

/// Render the setup-deno man page into `man/` at the crate root
///
/// The page is named after the command. A tree that cannot be written to,
/// such as a vendored or read-only checkout, keeps building without it.
fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let cmd = Cli::command();
    let page_name = format!("{}.1", cmd.get_name());

    let mut page: Vec<u8> = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut page)
        .expect("man page renders from the CLI definition");

    let out_dir: PathBuf = [env!("CARGO_MANIFEST_DIR"), "man"].iter().collect();
    if fs::create_dir_all(&out_dir).is_err() || fs::write(out_dir.join(&page_name), page).is_err() {
        println!("cargo::warning=skipped writing man/{page_name}");
    }
}
