//! Document model: nodes, decoding and owned trees.

pub mod node;
pub mod parser;
pub mod tree;
