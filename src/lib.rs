//! docdr - documentation coverage and annotation for Go source trees
//!
//! Loads every Go file under a directory, reports how many exported functions
//! per package carry a doc comment, and walks an operator through adding the
//! missing ones.

pub mod annotate;
pub mod config;
pub mod coverage;
pub mod editor;
pub mod error;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod writer;

pub use error::{DocResult, DocdrError};
