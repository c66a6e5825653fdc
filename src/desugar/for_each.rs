//! Rewrite of enhanced for loops into explicit iterator while loops
//!
//! A loop of the form
//!
//! ```java
//! for (Type v : iterable) body
//! ```
//!
//! becomes
//!
//! ```java
//! {
//!     java.util.Iterator<Type> vIter = iterable.iterator();
//!     while (vIter.hasNext()) {
//!         Type v = vIter.next();
//!         body;
//!     }
//! }
//! ```
//!
//! The iterator variable takes the loop variable's name with an `Iter`
//! suffix. A user variable already carrying that name would collide; the
//! rewrite does not rename around it.

use super::normalize::into_block;
use crate::ast::{
    Ast, Block, ClassMember, Expr, ForEachStmt, IdentifierExpr, MethodCallExpr, Span, Stmt,
    TypeRef, VarDeclStmt, VariableDeclarator, WhileStmt,
};
use crate::error::Result;

/// Rewrite pass that eliminates every `ForEachStmt` from the tree
pub struct ForEachLoops {
    pub rewritten: usize,
}

impl ForEachLoops {
    pub fn new() -> Self {
        Self { rewritten: 0 }
    }

    /// Process an AST, replacing each enhanced for loop with its
    /// iterator form
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
            Stmt::For(for_stmt) => self.rewrite_stmt(&mut for_stmt.body),
            Stmt::ForEach(_) => {
                let Stmt::ForEach(for_each) = std::mem::replace(stmt, Stmt::Empty) else {
                    unreachable!("matched ForEachStmt above");
                };
                *stmt = self.rewrite_for_each(for_each);
                self.rewritten += 1;
            }
            _ => {}
        }
    }

    fn rewrite_for_each(&mut self, mut for_each: ForEachStmt) -> Stmt {
        self.rewrite_stmt(&mut for_each.body);

        let span = for_each.span;
        let iter_name = format!("{}Iter", for_each.var_name);

        // java.util.Iterator<Type> vIter = iterable.iterator();
        let iterator_type = TypeRef {
            name: "java.util.Iterator".to_string(),
            type_args: vec![for_each.var_type.clone()],
            array_dims: 0,
            span: Span::synthetic(),
        };
        let iterator_decl = Stmt::Declaration(VarDeclStmt {
            type_ref: iterator_type,
            variables: vec![VariableDeclarator {
                name: iter_name.clone(),
                initializer: Some(Expr::MethodCall(MethodCallExpr::on(
                    for_each.iterable,
                    "iterator",
                    Span::synthetic(),
                ))),
                span: Span::synthetic(),
            }],
            span: Span::synthetic(),
        });

        // Type v = vIter.next();
        let next_decl = Stmt::Declaration(VarDeclStmt {
            type_ref: for_each.var_type,
            variables: vec![VariableDeclarator {
                name: for_each.var_name,
                initializer: Some(Expr::MethodCall(MethodCallExpr::on(
                    Self::identifier(&iter_name),
                    "next",
                    Span::synthetic(),
                ))),
                span: Span::synthetic(),
            }],
            span: Span::synthetic(),
        });

        let mut body = into_block(*for_each.body);
        body.statements.insert(0, next_decl);

        // while (vIter.hasNext())
        let condition = Expr::MethodCall(MethodCallExpr::on(
            Self::identifier(&iter_name),
            "hasNext",
            Span::synthetic(),
        ));
        let while_stmt = Stmt::While(WhileStmt {
            condition,
            body: Box::new(Stmt::Block(body)),
            span,
        });

        Stmt::Block(Block::new(vec![iterator_decl, while_stmt], span))
    }

    fn identifier(name: &str) -> Expr {
        Expr::Identifier(IdentifierExpr {
            name: name.to_string(),
            span: Span::synthetic(),
        })
    }
}

impl Default for ForEachLoops {
    fn default() -> Self {
        Self::new()
    }
}
