//! Document loading.
//!
//! Documents are read from a file or from stdin and decoded into a [`Tree`].
//! Gzip input is recognized by a `.gz` extension on files and by the gzip
//! magic bytes on stdin. Empty input decodes to a null root.

use crate::document::parser::parse_yaml;
use crate::document::tree::Tree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML (or JSON) file.
///
/// # Examples
///
/// ```no_run
/// use yamlnub::file::loader::load_file;
///
/// let tree = load_file("deployment.yaml").unwrap();
/// let image = tree.get("spec.containers.[0].image");
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is corrupt gzip, or is not
/// valid YAML.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Tree> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), "loading document");
    load_str(&content).with_context(|| format!("Failed to load {}", path.display()))
}

/// Loads and parses a document from standard input.
pub fn load_stdin() -> Result<Tree> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    load_bytes(&buffer).context("Failed to load document from stdin")
}

/// Loads from `path`, where `-` means standard input.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Tree> {
    let path = path.as_ref();
    if path == Path::new("-") {
        load_stdin()
    } else {
        load_file(path)
    }
}

/// Parses document text into a tree.
pub fn load_str(content: &str) -> Result<Tree> {
    Ok(Tree::new(parse_yaml(content)?))
}

/// Parses raw bytes into a tree, decompressing them first if they are gzip.
pub fn load_bytes(bytes: &[u8]) -> Result<Tree> {
    let content = if bytes.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(bytes)?
    } else {
        String::from_utf8(bytes.to_vec()).context("Input is not valid UTF-8")?
    };
    load_str(&content)
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "gz")
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = flate2::read::GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip input")?;
    Ok(content)
}
