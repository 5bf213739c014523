//! # Visitors
//!
//! Tree-walking passes over parser output.

pub mod tree_to_ast;
