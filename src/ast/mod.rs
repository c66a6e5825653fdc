//! Abstract Syntax Tree (AST) representation for the supported Java subset
//!
//! This module defines the AST nodes that represent parsed Java source.

mod dump;
mod nodes;
mod printer;
mod visitor;

pub use dump::*;
pub use nodes::*;
pub use printer::*;
pub use visitor::*;

use std::fmt;

/// Source location information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

/// Span of source code (start and end locations)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Span for nodes synthesized by a rewrite rather than parsed from source
    pub fn synthetic() -> Self {
        Self::default()
    }
}

/// AST node trait that all AST nodes implement
pub trait AstNode {
    /// Get the source span of this node
    fn span(&self) -> Span;

    /// Accept a visitor
    fn accept<V: AstVisitor>(&self, visitor: &mut V) -> V::Output;
}

/// Main AST root node: one compilation unit
#[derive(Debug, Clone)]
pub struct Ast {
    pub package_decl: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub classes: Vec<ClassDecl>,
    pub span: Span,
}

impl AstNode for Ast {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_ast(self)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = AstPrinter::new();
        write!(f, "{}", printer.print(self))
    }
}
