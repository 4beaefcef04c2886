//! End-to-end generation of `ci-tests.ini` for one CI job.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::blocks::{assemble, block_name, extract_test_blocks};
use crate::core::flags::CiFlags;
use crate::core::preamble::{test_dir_from, transform_document};
use crate::core::selector::{Selection, select_blocks};
use crate::io::files::{INPUT_FILE, OUTPUT_FILE, read_document, write_document};

/// Where to read the nightly configuration and write the CI one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_FILE),
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}

/// Result of rewriting and filtering one document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub document: String,
    pub selection: Selection,
}

impl Prepared {
    /// Header names of the selected test blocks, duplicates included.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selection
            .blocks
            .iter()
            .filter_map(|block| block_name(block))
            .collect()
    }
}

/// Rewrite, extract, select and reassemble `text`.
pub fn prepare_document(text: &str, flags: &CiFlags, test_dir: &str) -> Prepared {
    let transformed = transform_document(text, flags, test_dir);
    let extracted = extract_test_blocks(&transformed);
    debug!(blocks = extracted.blocks.len(), "extracted test blocks");
    let selection = select_blocks(&extracted.blocks, flags);
    let document = assemble(&extracted.preamble, &selection.blocks);
    Prepared {
        document,
        selection,
    }
}

/// Generate the CI configuration inside `work_dir`.
///
/// Progress messages (`Compiling for ...`, `Selecting tests ...`) go to `out`.
/// Nothing is written to the output path unless every step succeeds.
pub fn prepare_in_dir(
    work_dir: &Path,
    flags: &CiFlags,
    options: &PrepareOptions,
    out: &mut dyn Write,
) -> Result<Prepared> {
    let input = work_dir.join(&options.input);
    let output = work_dir.join(&options.output);
    let text = read_document(&input).context("load nightly configuration")?;

    let scenarios: Vec<&str> = flags.scenarios().iter().map(|s| s.env_var()).collect();
    info!(arch = %flags.arch, ?scenarios, "preparing CI configuration");

    let test_dir = test_dir_from(&work_dir.to_string_lossy());
    writeln!(out, "Compiling for {}", flags.arch).context("write progress")?;
    let prepared = prepare_document(&text, flags, &test_dir);
    for step in &prepared.selection.steps {
        writeln!(out, "{step}").context("write progress")?;
    }

    write_document(&output, &prepared.document).context("write CI configuration")?;
    info!(
        selected = prepared.selection.blocks.len(),
        output = %output.display(),
        "CI configuration written"
    );
    Ok(prepared)
}
