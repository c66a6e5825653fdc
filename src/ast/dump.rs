use super::nodes::*;
use super::Ast;
use std::fmt::Write;

/// Dumps an AST in a human-friendly indented form: one line per node, a kind
/// name followed by that kind's scalar attributes, children indented below.
///
/// Each node kind declares a fixed attribute list here; collection-valued and
/// node-valued fields become child lines instead.
pub struct TreeDumper {
    tab_size: usize,
    output: String,
}

impl TreeDumper {
    pub fn new(tab_size: usize) -> Self {
        Self {
            tab_size,
            output: String::new(),
        }
    }

    /// Recursively dump the tree, returning the rendered text.
    pub fn dump(&mut self, ast: &Ast) -> String {
        self.output.clear();
        self.line(0, "CompilationUnit", &[]);
        let depth = 1;
        if let Some(ref package) = ast.package_decl {
            self.line(depth, "PackageDecl", &[("name", quoted(&package.name))]);
        }
        for import in &ast.imports {
            self.line(
                depth,
                "ImportDecl",
                &[
                    ("name", quoted(&import.name)),
                    ("wildcard", import.is_wildcard.to_string()),
                ],
            );
        }
        for class in &ast.classes {
            self.dump_class(depth, class);
        }
        self.output.clone()
    }

    fn line(&mut self, depth: usize, kind: &str, attrs: &[(&str, String)]) {
        for _ in 0..depth * self.tab_size {
            self.output.push(' ');
        }
        self.output.push_str(kind);
        for (name, value) in attrs {
            let _ = write!(self.output, " {}={}", name, value);
        }
        self.output.push('\n');
    }

    fn dump_class(&mut self, depth: usize, class: &ClassDecl) {
        let mut attrs = vec![("name", quoted(&class.name))];
        if let Some(ref extends) = class.extends {
            attrs.push(("extends", quoted(&type_text(extends))));
        }
        self.line(depth, "ClassDecl", &attrs);
        for member in &class.body {
            match member {
                ClassMember::Field(field) => self.dump_field(depth + 1, field),
                ClassMember::Method(method) => self.dump_method(depth + 1, method),
            }
        }
    }

    fn dump_field(&mut self, depth: usize, field: &FieldDecl) {
        self.line(
            depth,
            "FieldDecl",
            &[
                ("name", quoted(&field.name)),
                ("type", quoted(&type_text(&field.type_ref))),
            ],
        );
        if let Some(ref initializer) = field.initializer {
            self.dump_expr(depth + 1, initializer);
        }
    }

    fn dump_method(&mut self, depth: usize, method: &MethodDecl) {
        let return_type = method
            .return_type
            .as_ref()
            .map(type_text)
            .unwrap_or_else(|| "void".to_string());
        self.line(
            depth,
            "MethodDecl",
            &[
                ("name", quoted(&method.name)),
                ("returns", quoted(&return_type)),
            ],
        );
        for param in &method.parameters {
            self.line(
                depth + 1,
                "Parameter",
                &[
                    ("name", quoted(&param.name)),
                    ("type", quoted(&type_text(&param.type_ref))),
                ],
            );
        }
        if let Some(ref body) = method.body {
            for stmt in &body.statements {
                self.dump_stmt(depth + 1, stmt);
            }
        }
    }

    fn dump_stmt(&mut self, depth: usize, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr_stmt) => {
                self.line(depth, stmt.kind_name(), &[]);
                self.dump_expr(depth + 1, &expr_stmt.expr);
            }
            Stmt::Declaration(var_decl) => {
                self.line(
                    depth,
                    stmt.kind_name(),
                    &[("type", quoted(&type_text(&var_decl.type_ref)))],
                );
                for var in &var_decl.variables {
                    self.line(
                        depth + 1,
                        "VariableDeclarator",
                        &[("name", quoted(&var.name))],
                    );
                    if let Some(ref initializer) = var.initializer {
                        self.dump_expr(depth + 2, initializer);
                    }
                }
            }
            Stmt::If(if_stmt) => {
                self.line(depth, stmt.kind_name(), &[]);
                self.dump_expr(depth + 1, &if_stmt.condition);
                self.dump_stmt(depth + 1, &if_stmt.then_branch);
                if let Some(ref else_branch) = if_stmt.else_branch {
                    self.dump_stmt(depth + 1, else_branch);
                }
            }
            Stmt::While(while_stmt) => {
                self.line(depth, stmt.kind_name(), &[]);
                self.dump_expr(depth + 1, &while_stmt.condition);
                self.dump_stmt(depth + 1, &while_stmt.body);
            }
            Stmt::For(for_stmt) => {
                self.line(depth, stmt.kind_name(), &[]);
                for init in &for_stmt.init {
                    self.dump_stmt(depth + 1, init);
                }
                if let Some(ref condition) = for_stmt.condition {
                    self.dump_expr(depth + 1, condition);
                }
                for update in &for_stmt.update {
                    self.dump_expr(depth + 1, &update.expr);
                }
                self.dump_stmt(depth + 1, &for_stmt.body);
            }
            Stmt::ForEach(for_each) => {
                self.line(
                    depth,
                    stmt.kind_name(),
                    &[
                        ("var", quoted(&for_each.var_name)),
                        ("type", quoted(&type_text(&for_each.var_type))),
                    ],
                );
                self.dump_expr(depth + 1, &for_each.iterable);
                self.dump_stmt(depth + 1, &for_each.body);
            }
            Stmt::Return(return_stmt) => {
                self.line(depth, stmt.kind_name(), &[]);
                if let Some(ref value) = return_stmt.value {
                    self.dump_expr(depth + 1, value);
                }
            }
            Stmt::Break(break_stmt) => {
                let attrs = match break_stmt.label {
                    Some(ref label) => vec![("label", quoted(label))],
                    None => vec![],
                };
                self.line(depth, stmt.kind_name(), &attrs);
            }
            Stmt::Continue(continue_stmt) => {
                let attrs = match continue_stmt.label {
                    Some(ref label) => vec![("label", quoted(label))],
                    None => vec![],
                };
                self.line(depth, stmt.kind_name(), &attrs);
            }
            Stmt::Block(block) => {
                self.line(depth, stmt.kind_name(), &[]);
                for child in &block.statements {
                    self.dump_stmt(depth + 1, child);
                }
            }
            Stmt::Empty => {
                self.line(depth, stmt.kind_name(), &[]);
            }
        }
    }

    fn dump_expr(&mut self, depth: usize, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => {
                self.line(
                    depth,
                    expr.kind_name(),
                    &[("value", literal.value.to_string())],
                );
            }
            Expr::Identifier(identifier) => {
                self.line(depth, expr.kind_name(), &[("name", quoted(&identifier.name))]);
            }
            Expr::Binary(binary) => {
                self.line(
                    depth,
                    expr.kind_name(),
                    &[("operator", quoted(binary.operator.symbol()))],
                );
                self.dump_expr(depth + 1, &binary.left);
                self.dump_expr(depth + 1, &binary.right);
            }
            Expr::Unary(unary) => {
                self.line(
                    depth,
                    expr.kind_name(),
                    &[
                        ("operator", quoted(unary.operator.symbol())),
                        ("postfix", unary.operator.is_postfix().to_string()),
                    ],
                );
                self.dump_expr(depth + 1, &unary.operand);
            }
            Expr::Assignment(assignment) => {
                self.line(
                    depth,
                    expr.kind_name(),
                    &[("operator", quoted(assignment.operator.symbol()))],
                );
                self.dump_expr(depth + 1, &assignment.target);
                self.dump_expr(depth + 1, &assignment.value);
            }
            Expr::MethodCall(method_call) => {
                self.line(depth, expr.kind_name(), &[("name", quoted(&method_call.name))]);
                if let Some(ref target) = method_call.target {
                    self.dump_expr(depth + 1, target);
                }
                for arg in &method_call.arguments {
                    self.dump_expr(depth + 1, arg);
                }
            }
            Expr::FieldAccess(field_access) => {
                self.line(depth, expr.kind_name(), &[("name", quoted(&field_access.name))]);
                if let Some(ref target) = field_access.target {
                    self.dump_expr(depth + 1, target);
                }
            }
            Expr::ArrayAccess(array_access) => {
                self.line(depth, expr.kind_name(), &[]);
                self.dump_expr(depth + 1, &array_access.array);
                self.dump_expr(depth + 1, &array_access.index);
            }
            Expr::Conditional(conditional) => {
                self.line(depth, expr.kind_name(), &[]);
                self.dump_expr(depth + 1, &conditional.condition);
                self.dump_expr(depth + 1, &conditional.then_expr);
                self.dump_expr(depth + 1, &conditional.else_expr);
            }
            Expr::New(new) => {
                self.line(
                    depth,
                    expr.kind_name(),
                    &[("type", quoted(&type_text(&new.target_type)))],
                );
                for arg in &new.arguments {
                    self.dump_expr(depth + 1, arg);
                }
            }
            Expr::Parenthesized(inner) => {
                self.line(depth, expr.kind_name(), &[]);
                self.dump_expr(depth + 1, inner);
            }
        }
    }
}

/// Render a type reference as flat text for use as a scalar attribute
fn type_text(type_ref: &TypeRef) -> String {
    let mut text = type_ref.name.clone();
    if !type_ref.type_args.is_empty() {
        text.push('<');
        for (i, arg) in type_ref.type_args.iter().enumerate() {
            if i > 0 {
                text.push_str(", ");
            }
            text.push_str(&type_text(arg));
        }
        text.push('>');
    }
    for _ in 0..type_ref.array_dims {
        text.push_str("[]");
    }
    text
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}
