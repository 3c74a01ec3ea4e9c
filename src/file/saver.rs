//! Document saving.
//!
//! Writes are atomic: the document goes to a temporary file next to the
//! target, which is then renamed over it. A `.gz` target is gzip-compressed.

use crate::config::{Config, OutputFormat};
use crate::document::parser::parse_yaml;
use crate::document::tree::Tree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders a tree in the given format, always ending with a newline.
pub fn render(tree: &Tree, format: OutputFormat) -> Result<String> {
    let mut text = match format {
        OutputFormat::Yaml => tree.to_yaml()?,
        OutputFormat::Json => tree.to_json_pretty()?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Picks the output format for `path`: `.json` (optionally followed by
/// `.gz`) is JSON, anything else falls back to the configured format.
pub fn format_for_path(path: &Path, config: &Config) -> OutputFormat {
    let name = path.to_string_lossy();
    let base = name.strip_suffix(".gz").unwrap_or(&name);
    if base.ends_with(".json") {
        OutputFormat::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        OutputFormat::Yaml
    } else {
        config.output_format
    }
}

/// Saves a tree to `path`, creating a `.bak` copy first when the config asks
/// for one and the file already exists.
///
/// # Examples
///
/// ```no_run
/// use yamlnub::config::Config;
/// use yamlnub::document::tree::Tree;
/// use yamlnub::file::saver::save_file;
///
/// let tree: Tree = "replicas: 3\n".parse().unwrap();
/// save_file("deployment.yaml", &tree, &Config::default()).unwrap();
/// ```
pub fn save_file<P: AsRef<Path>>(path: P, tree: &Tree, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let compress = path.to_string_lossy().ends_with(".gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let text = render(tree, format_for_path(path, config))?;

    // Catch encoder bugs before they reach the disk
    parse_yaml(&text).context("Generated output does not parse back")?;

    write_file_atomic(path, text.as_bytes(), compress)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), compress, "saved document");
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;
    Ok(path.with_file_name(format!("{}.{}", name, suffix)))
}

/// Copies `path` to `path.bak`.
fn create_backup(path: &Path) -> Result<()> {
    let backup_path = sibling_with_suffix(path, "bak")?;
    fs::copy(path, &backup_path).context("Failed to create backup")?;
    tracing::debug!(backup = %backup_path.display(), "created backup");
    Ok(())
}

fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let temp_path = sibling_with_suffix(path, "tmp")?;

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;
    Ok(())
}
