//! File I/O for documents.
//!
//! This module loads documents from disk or stdin and saves trees back to
//! files with atomic writes and optional backups.

pub mod loader;
pub mod saver;
