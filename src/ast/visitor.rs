use super::*;

/// AST visitor trait for traversing and processing AST nodes
pub trait AstVisitor {
    type Output;

    // AST root
    fn visit_ast(&mut self, ast: &Ast) -> Self::Output;

    // Package and imports
    fn visit_package_decl(&mut self, package: &PackageDecl) -> Self::Output;
    fn visit_import_decl(&mut self, import: &ImportDecl) -> Self::Output;

    // Declarations
    fn visit_class_decl(&mut self, class: &ClassDecl) -> Self::Output;
    fn visit_field_decl(&mut self, field: &FieldDecl) -> Self::Output;
    fn visit_method_decl(&mut self, method: &MethodDecl) -> Self::Output;
    fn visit_parameter(&mut self, parameter: &Parameter) -> Self::Output;

    // Statements
    fn visit_block(&mut self, block: &Block) -> Self::Output;
    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::Output;

    // Expressions
    fn visit_expr(&mut self, expr: &Expr) -> Self::Output;

    // Types
    fn visit_type_ref(&mut self, type_ref: &TypeRef) -> Self::Output;
}

/// Lazy pre-order iterator over every statement in a tree.
///
/// Traversal order is a documented contract: parents are yielded before their
/// children, and siblings left to right, so the sequence matches source
/// order. The iterator is restartable by calling [`stmts`] again.
pub struct Stmts<'a> {
    stack: Vec<&'a Stmt>,
}

/// Iterate all statements of a compilation unit in pre-order.
pub fn stmts(ast: &Ast) -> Stmts<'_> {
    let mut stack = Vec::new();
    // Reverse so the first class's first method comes off the stack first
    for class in ast.classes.iter().rev() {
        for member in class.body.iter().rev() {
            if let ClassMember::Method(method) = member {
                if let Some(ref body) = method.body {
                    for stmt in body.statements.iter().rev() {
                        stack.push(stmt);
                    }
                }
            }
        }
    }
    Stmts { stack }
}

/// Iterate all statements under a single statement, including itself.
pub fn stmts_in(stmt: &Stmt) -> Stmts<'_> {
    Stmts { stack: vec![stmt] }
}

impl<'a> Iterator for Stmts<'a> {
    type Item = &'a Stmt;

    fn next(&mut self) -> Option<Self::Item> {
        let stmt = self.stack.pop()?;
        // Children pushed in reverse so they pop left to right
        match stmt {
            Stmt::If(if_stmt) => {
                if let Some(ref else_branch) = if_stmt.else_branch {
                    self.stack.push(else_branch);
                }
                self.stack.push(&if_stmt.then_branch);
            }
            Stmt::While(while_stmt) => {
                self.stack.push(&while_stmt.body);
            }
            Stmt::For(for_stmt) => {
                self.stack.push(&for_stmt.body);
                for init in for_stmt.init.iter().rev() {
                    self.stack.push(init);
                }
            }
            Stmt::ForEach(for_each) => {
                self.stack.push(&for_each.body);
            }
            Stmt::Block(block) => {
                for child in block.statements.iter().rev() {
                    self.stack.push(child);
                }
            }
            Stmt::Expression(_)
            | Stmt::Declaration(_)
            | Stmt::Return(_)
            | Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::Empty => {}
        }
        Some(stmt)
    }
}

/// Count statements matching a predicate anywhere in the tree.
pub fn count_stmts(ast: &Ast, pred: impl Fn(&Stmt) -> bool) -> usize {
    stmts(ast).filter(|s| pred(s)).count()
}
