//! Common utilities shared by the Quarry crates.
//!
//! This crate provides shared infrastructure used by the tree model, the
//! selector engine and the CLI:
//! - **Warning System** - colored, de-duplicated diagnostics on stderr

pub mod warning;
