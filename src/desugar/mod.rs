//! Desugaring pipeline
//!
//! Rewrites syntactic sugar into a smaller statement vocabulary:
//!
//! - C-style for loops become while loops inside a scoping block
//! - Enhanced for loops become explicit iterator while loops
//!
//! The for pass runs first, so an enhanced loop nested inside a C-style
//! loop (or the other way around) is handled either way. Each pass
//! rewrites bottom-up and leaves no loop of its kind behind.

pub mod for_each;
pub mod for_loops;
pub mod normalize;

pub use for_each::ForEachLoops;
pub use for_loops::ForLoops;
pub use normalize::into_block;

use crate::ast::{count_stmts, Ast, Stmt};
use crate::error::{Error, Result};

/// Counts of rewrites performed by a pipeline run
#[derive(Debug, Default, Clone, Copy)]
pub struct DesugarStats {
    pub for_loops: usize,
    pub for_each_loops: usize,
}

/// Pipeline that orchestrates the rewrite passes in order
pub struct Desugarer {
    pub for_loops: ForLoops,
    pub for_each: ForEachLoops,
}

impl Desugarer {
    pub fn new() -> Self {
        Self {
            for_loops: ForLoops::new(),
            for_each: ForEachLoops::new(),
        }
    }

    /// Run all rewrite passes over the AST
    pub fn desugar(&mut self, mut ast: Ast) -> Result<Ast> {
        eprintln!("desugar: rewriting C-style for loops");
        ast = self.for_loops.process(ast)?;

        eprintln!("desugar: rewriting enhanced for loops");
        ast = self.for_each.process(ast)?;

        // Both passes claim totality; a survivor means a walk missed a slot
        let survivors = count_stmts(&ast, |s| matches!(s, Stmt::For(_) | Stmt::ForEach(_)));
        if survivors > 0 {
            return Err(Error::internal_error(format!(
                "{} loop statements survived desugaring",
                survivors
            )));
        }

        let stats = self.stats();
        eprintln!(
            "desugar: done ({} for loops, {} enhanced for loops)",
            stats.for_loops, stats.for_each_loops
        );

        Ok(ast)
    }

    pub fn stats(&self) -> DesugarStats {
        DesugarStats {
            for_loops: self.for_loops.rewritten,
            for_each_loops: self.for_each.rewritten,
        }
    }
}

impl Default for Desugarer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{stmts, Stmt};
    use crate::parser::parse_java;

    fn desugar_source(source: &str) -> Ast {
        let ast = parse_java(source).expect("Failed to parse");
        Desugarer::new().desugar(ast).expect("Failed to desugar")
    }

    #[test]
    fn test_no_loops_survive() {
        let ast = desugar_source(
            r#"
            class T {
                void m(java.util.List<String> lines) {
                    for (int i = 0; i < 10; i++) {
                        for (String s : lines) {
                            use(i, s);
                        }
                    }
                }
            }
            "#,
        );

        assert!(!stmts(&ast).any(|s| matches!(s, Stmt::For(_) | Stmt::ForEach(_))));
        assert!(stmts(&ast).any(|s| matches!(s, Stmt::While(_))));
    }

    #[test]
    fn test_stats_count_each_kind() {
        let ast = parse_java(
            r#"
            class T {
                void m(java.util.List<String> lines) {
                    for (int i = 0; i < 2; i++) step();
                    for (int j = 0; j < 2; j++) step();
                    for (String s : lines) use(s);
                }
            }
            "#,
        )
        .expect("Failed to parse");

        let mut desugarer = Desugarer::new();
        desugarer.desugar(ast).expect("Failed to desugar");

        let stats = desugarer.stats();
        assert_eq!(stats.for_loops, 2);
        assert_eq!(stats.for_each_loops, 1);
    }
}
