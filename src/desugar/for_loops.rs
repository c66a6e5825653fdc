//! Rewrite of C-style for loops into while loops
//!
//! A loop of the form
//!
//! ```java
//! for (init; condition; update) body
//! ```
//!
//! becomes
//!
//! ```java
//! {
//!     init;
//!     while (condition) {
//!         body;
//!         update;
//!     }
//! }
//! ```
//!
//! The surrounding block scopes the initializer variables the same way
//! the for header did. A missing condition becomes the literal `true`.

use super::normalize::into_block;
use crate::ast::{Ast, Block, ClassMember, Expr, ForStmt, Stmt, VarDeclStmt, WhileStmt};
use crate::error::Result;

/// Rewrite pass that eliminates every `ForStmt` from the tree
pub struct ForLoops {
    pub rewritten: usize,
}

impl ForLoops {
    pub fn new() -> Self {
        Self { rewritten: 0 }
    }

    /// Process an AST, replacing each for loop with its while form
    pub fn process(&mut self, mut ast: Ast) -> Result<Ast> {
        for class in &mut ast.classes {
            for member in &mut class.body {
                if let ClassMember::Method(method) = member {
                    if let Some(body) = &mut method.body {
                        self.rewrite_block(body);
                    }
                }
            }
        }
        Ok(ast)
    }

    fn rewrite_block(&mut self, block: &mut Block) {
        for stmt in &mut block.statements {
            self.rewrite_stmt(stmt);
        }
    }

    /// Rewrite inside out: a loop's body is processed before the loop
    /// itself is replaced, so nesting depth never matters.
    fn rewrite_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Block(block) => self.rewrite_block(block),
            Stmt::If(if_stmt) => {
                self.rewrite_stmt(&mut if_stmt.then_branch);
                if let Some(else_branch) = &mut if_stmt.else_branch {
                    self.rewrite_stmt(else_branch);
                }
            }
            Stmt::While(while_stmt) => self.rewrite_stmt(&mut while_stmt.body),
            Stmt::ForEach(for_each) => self.rewrite_stmt(&mut for_each.body),
            Stmt::For(_) => {
                let Stmt::For(for_stmt) = std::mem::replace(stmt, Stmt::Empty) else {
                    unreachable!("matched ForStmt above");
                };
                *stmt = self.rewrite_for(for_stmt);
                self.rewritten += 1;
            }
            _ => {}
        }
    }

    fn rewrite_for(&mut self, mut for_stmt: ForStmt) -> Stmt {
        self.rewrite_stmt(&mut for_stmt.body);

        let span = for_stmt.span;

        let mut body = into_block(*for_stmt.body);
        for update in for_stmt.update {
            body.statements.push(Stmt::Expression(update));
        }

        let condition = for_stmt
            .condition
            .unwrap_or_else(|| Expr::literal_true(span));

        let while_stmt = Stmt::While(WhileStmt {
            condition,
            body: Box::new(Stmt::Block(body)),
            span,
        });

        // One statement per initializer: a multi-declarator declaration
        // splits so each variable gets its own slot in the scoping block
        let mut statements = Vec::new();
        for init in for_stmt.init {
            match init {
                Stmt::Declaration(decl) if decl.variables.len() > 1 => {
                    for var in decl.variables {
                        statements.push(Stmt::Declaration(VarDeclStmt {
                            type_ref: decl.type_ref.clone(),
                            variables: vec![var],
                            span: decl.span,
                        }));
                    }
                }
                other => statements.push(other),
            }
        }
        statements.push(while_stmt);
        Stmt::Block(Block::new(statements, span))
    }
}

impl Default for ForLoops {
    fn default() -> Self {
        Self::new()
    }
}
