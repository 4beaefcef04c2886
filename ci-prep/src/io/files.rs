//! Configuration file access.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Nightly regression configuration read from the working directory.
pub const INPUT_FILE: &str = "WarpX-tests.ini";
/// CI configuration written to the working directory.
pub const OUTPUT_FILE: &str = "ci-tests.ini";

/// Read the whole source document.
pub fn read_document(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "read configuration");
    Ok(text)
}

/// Replace `path` with `contents` (temp file + rename).
///
/// Any previous file at `path` is overwritten without a backup.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("ini.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp output {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace output {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_overwrites_existing_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(OUTPUT_FILE);
        fs::write(&path, "old").expect("seed");
        write_document(&path, "new\n").expect("write");
        assert_eq!(read_document(&path).expect("read"), "new\n");
        assert!(!temp.path().join("ci-tests.ini.tmp").exists());
    }

    #[test]
    fn read_missing_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = read_document(&temp.path().join(INPUT_FILE)).unwrap_err();
        assert!(format!("{err:#}").contains(INPUT_FILE));
    }
}
