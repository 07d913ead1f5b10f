//! Front end for a small LaTeX-like markup language.
//!
//! The pipeline has four stages: [`lexer::scan`] turns source text into
//! tokens, [`ast::parse_tokens`] builds a source-shaped tree,
//! [`elaborate::elaborate`] resolves command and environment meaning into
//! the document IR ([`ir`]), and [`document::Document`] carries the result
//! to backends. Every stage is total: malformed input degrades to literal
//! text or an advisory diagnostic, never an error return.

pub mod ast;
mod common;

pub use common::*;
pub mod document;
pub mod elaborate;
pub mod ir;
pub mod lexer;
