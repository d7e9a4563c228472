//! govdoc-ast - Block and span definitions
//!
//! This crate provides the types shared by the govdoc pipelines: the typed
//! blocks produced by markdown parsing, the styled spans produced by inline
//! formatting, and the document that carries them to a renderer.

pub mod block;
pub mod document;
pub mod inline;

pub use block::{Block, TableRows};
pub use document::Document;
pub use inline::{plain_text, Emphasis, StyledSpan};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
