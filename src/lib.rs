//! yamlnub - kind-checked collections and a small path language for
//! reading and editing YAML/JSON document trees.
//!
//! - [`document`] decodes text into [`document::node::Node`] trees and back.
//! - [`yamlpath`] parses dot-delimited paths and evaluates them for reads
//!   and writes.
//! - [`collection`] provides [`collection::Collection`], an ordered sequence
//!   pinned to a single element kind.
//! - [`index`] holds the negative-index and inclusive-range rules shared by
//!   all of the above.
//! - [`file`] and [`config`] back the `yamlnub` command line tool.

pub mod collection;
pub mod config;
pub mod document;
pub mod file;
pub mod index;
pub mod yamlpath;
