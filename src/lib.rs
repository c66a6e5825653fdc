//! jdesugar - a Java AST desugaring toolkit
//!
//! Parses a subset of Java into an AST, dumps the tree in an indented
//! one-node-per-line form, and rewrites loop sugar into while loops:
//! C-style for loops and enhanced for loops both disappear.
//!
//! # Example
//!
//! ```no_run
//! use jdesugar::desugar_source;
//!
//! let ast = desugar_source("class T { void m() { for (;;) tick(); } }")?;
//! println!("{}", ast);
//! # Ok::<(), jdesugar::Error>(())
//! ```

pub mod ast;
pub mod desugar;
pub mod error;
pub mod parser;

pub use error::{Error, Result};

use ast::Ast;
use desugar::Desugarer;

/// Parse Java source into an AST
pub fn parse_source(source: &str) -> Result<Ast> {
    parser::parse_java(source)
}

/// Parse Java source and run the full desugaring pipeline on it
pub fn desugar_source(source: &str) -> Result<Ast> {
    let ast = parser::parse_java(source)?;
    Desugarer::new().desugar(ast)
}
