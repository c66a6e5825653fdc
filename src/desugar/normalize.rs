//! Statement normalization helpers shared by the rewrite passes

use crate::ast::{Block, Stmt};

/// Normalize a statement into a block.
///
/// A statement that already is a block passes through unchanged, so
/// rewrites never introduce an extra nesting level. Any other statement
/// becomes a block holding just that statement. This lets a rewrite
/// append to a loop body without caring whether the source used braces.
pub fn into_block(stmt: Stmt) -> Block {
    match stmt {
        Stmt::Block(block) => block,
        other => {
            let span = other.span();
            Block::new(vec![other], span)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ContinueStmt, Span};

    #[test]
    fn test_block_passes_through() {
        let inner = Stmt::Continue(ContinueStmt {
            label: None,
            span: Span::synthetic(),
        });
        let block = Block::new(vec![inner, Stmt::Empty], Span::synthetic());

        let normalized = into_block(Stmt::Block(block));

        assert_eq!(normalized.statements.len(), 2);
    }

    #[test]
    fn test_single_statement_gets_wrapped() {
        let stmt = Stmt::Continue(ContinueStmt {
            label: None,
            span: Span::synthetic(),
        });

        let normalized = into_block(stmt);

        assert_eq!(normalized.statements.len(), 1);
        assert!(matches!(normalized.statements[0], Stmt::Continue(_)));
    }
}
