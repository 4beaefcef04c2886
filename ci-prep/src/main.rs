//! Generate `ci-tests.ini` from the nightly `WarpX-tests.ini`.
//!
//! Test selection is driven entirely by `WARPX_*` environment variables; the
//! command-line options only relocate the input and output files.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ci_prep::core::flags::CiFlags;
use ci_prep::exit_codes;
use ci_prep::io::files::{INPUT_FILE, OUTPUT_FILE};
use ci_prep::logging;
use ci_prep::prepare::{PrepareOptions, prepare_in_dir};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ci-prep",
    version,
    about = "Build the CI regression configuration from the nightly one"
)]
struct Cli {
    /// Nightly configuration, relative to the working directory.
    #[arg(long, default_value = INPUT_FILE)]
    input: PathBuf,
    /// CI configuration to (over)write, relative to the working directory.
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,
    /// Print the name of every selected test after writing.
    #[arg(long)]
    list: bool,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let work_dir = std::env::current_dir().context("resolve working directory")?;
    let flags = CiFlags::from_env();
    let options = PrepareOptions {
        input: cli.input,
        output: cli.output,
    };

    let mut stdout = std::io::stdout().lock();
    let prepared = prepare_in_dir(&work_dir, &flags, &options, &mut stdout)?;
    if cli.list {
        for name in prepared.selected_names() {
            writeln!(stdout, "test: {}", name).context("write test list")?;
        }
    }
    Ok(())
}
