//! Test block extraction and reassembly.

use std::sync::LazyLock;

use regex::Regex;

/// A header line, then non-empty lines, one of them starting with `inputFile`,
/// then the rest of the paragraph.
static TEST_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:.+\n)*inputFile(?:.+\n)*").expect("test block regex is valid")
});

/// Document split into the block-free remainder and the test blocks it held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub preamble: String,
    /// Test blocks in document order.
    pub blocks: Vec<String>,
}

/// Pull every test block out of `text`.
pub fn extract_test_blocks(text: &str) -> Extracted {
    let blocks = TEST_BLOCK_RE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect();
    let preamble = TEST_BLOCK_RE.replace_all(text, "").into_owned();
    Extracted { preamble, blocks }
}

/// Join the preamble and the surviving blocks back into one document.
pub fn assemble(preamble: &str, blocks: &[String]) -> String {
    format!("{preamble}\n{}", blocks.join("\n"))
}

/// Section name from the block's leading `[name]` header, if it has one.
pub fn block_name(block: &str) -> Option<&str> {
    let header = block.lines().next()?;
    let inner = header.strip_prefix('[')?;
    let end = inner.rfind(']')?;
    Some(&inner[..end])
}
