use super::nodes::*;
use super::visitor::AstVisitor;
use super::Ast;

/// Pretty printer that renders an AST back to Java source text
pub struct AstPrinter {
    indent_level: usize,
    output: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn print(&mut self, ast: &Ast) -> String {
        self.output.clear();
        self.visit_ast(ast);
        self.output.clone()
    }

    fn indent(&mut self) {
        self.indent_level += 4;
    }

    fn dedent(&mut self) {
        if self.indent_level >= 4 {
            self.indent_level -= 4;
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push(' ');
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn write_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.output.push_str(&modifier.to_string());
            self.output.push(' ');
        }
    }

    fn write_var_declarators(&mut self, variables: &[VariableDeclarator]) {
        for (i, var) in variables.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&var.name);
            if let Some(ref initializer) = var.initializer {
                self.output.push_str(" = ");
                self.visit_expr(initializer);
            }
        }
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstVisitor for AstPrinter {
    type Output = ();

    fn visit_ast(&mut self, ast: &Ast) {
        if let Some(ref package) = ast.package_decl {
            self.visit_package_decl(package);
        }

        for import in &ast.imports {
            self.visit_import_decl(import);
        }
        if !ast.imports.is_empty() {
            self.output.push('\n');
        }

        for class in &ast.classes {
            self.visit_class_decl(class);
        }
    }

    fn visit_package_decl(&mut self, package: &PackageDecl) {
        self.writeln(&package.to_string());
        self.output.push('\n');
    }

    fn visit_import_decl(&mut self, import: &ImportDecl) {
        self.writeln(&import.to_string());
    }

    fn visit_class_decl(&mut self, class: &ClassDecl) {
        self.write_indent();
        self.write_modifiers(&class.modifiers);
        self.output.push_str("class ");
        self.output.push_str(&class.name);

        if let Some(ref extends) = class.extends {
            self.output.push_str(" extends ");
            self.visit_type_ref(extends);
        }

        self.output.push_str(" {\n");
        self.indent();

        for member in &class.body {
            match member {
                ClassMember::Field(f) => self.visit_field_decl(f),
                ClassMember::Method(m) => self.visit_method_decl(m),
            }
        }

        self.dedent();
        self.writeln("}");
    }

    fn visit_field_decl(&mut self, field: &FieldDecl) {
        self.write_indent();
        self.write_modifiers(&field.modifiers);
        self.visit_type_ref(&field.type_ref);
        self.output.push(' ');
        self.output.push_str(&field.name);

        if let Some(ref initializer) = field.initializer {
            self.output.push_str(" = ");
            self.visit_expr(initializer);
        }

        self.output.push_str(";\n");
    }

    fn visit_method_decl(&mut self, method: &MethodDecl) {
        self.write_indent();
        self.write_modifiers(&method.modifiers);

        if let Some(ref return_type) = method.return_type {
            self.visit_type_ref(return_type);
        } else {
            self.output.push_str("void");
        }
        self.output.push(' ');
        self.output.push_str(&method.name);

        self.output.push('(');
        for (i, param) in method.parameters.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.visit_parameter(param);
        }
        self.output.push(')');

        if let Some(ref body) = method.body {
            self.output.push_str(" {\n");
            self.indent();
            self.visit_block(body);
            self.dedent();
            self.writeln("}");
        } else {
            self.output.push_str(";\n");
        }
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        self.visit_type_ref(&parameter.type_ref);
        self.output.push(' ');
        self.output.push_str(&parameter.name);
    }

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr_stmt) => {
                self.write_indent();
                self.visit_expr(&expr_stmt.expr);
                self.output.push_str(";\n");
            }
            Stmt::Declaration(var_decl) => {
                self.write_indent();
                self.visit_type_ref(&var_decl.type_ref);
                self.output.push(' ');
                self.write_var_declarators(&var_decl.variables);
                self.output.push_str(";\n");
            }
            Stmt::If(if_stmt) => {
                self.write_indent();
                self.output.push_str("if (");
                self.visit_expr(&if_stmt.condition);
                self.output.push_str(") ");
                self.visit_stmt_as_branch(&if_stmt.then_branch);
                if let Some(ref else_branch) = if_stmt.else_branch {
                    self.write_indent();
                    self.output.push_str("else ");
                    self.visit_stmt_as_branch(else_branch);
                }
            }
            Stmt::While(while_stmt) => {
                self.write_indent();
                self.output.push_str("while (");
                self.visit_expr(&while_stmt.condition);
                self.output.push_str(") ");
                self.visit_stmt_as_branch(&while_stmt.body);
            }
            Stmt::For(for_stmt) => {
                self.write_indent();
                self.output.push_str("for (");
                for (i, init) in for_stmt.init.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.visit_stmt_inline(init);
                }
                self.output.push_str("; ");
                if let Some(ref condition) = for_stmt.condition {
                    self.visit_expr(condition);
                }
                self.output.push_str("; ");
                for (i, update) in for_stmt.update.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.visit_expr(&update.expr);
                }
                self.output.push_str(") ");
                self.visit_stmt_as_branch(&for_stmt.body);
            }
            Stmt::ForEach(for_each) => {
                self.write_indent();
                self.output.push_str("for (");
                self.visit_type_ref(&for_each.var_type);
                self.output.push(' ');
                self.output.push_str(&for_each.var_name);
                self.output.push_str(" : ");
                self.visit_expr(&for_each.iterable);
                self.output.push_str(") ");
                self.visit_stmt_as_branch(&for_each.body);
            }
            Stmt::Return(return_stmt) => {
                self.write_indent();
                self.output.push_str("return");
                if let Some(ref value) = return_stmt.value {
                    self.output.push(' ');
                    self.visit_expr(value);
                }
                self.output.push_str(";\n");
            }
            Stmt::Break(break_stmt) => {
                self.write_indent();
                self.output.push_str("break");
                if let Some(ref label) = break_stmt.label {
                    self.output.push(' ');
                    self.output.push_str(label);
                }
                self.output.push_str(";\n");
            }
            Stmt::Continue(continue_stmt) => {
                self.write_indent();
                self.output.push_str("continue");
                if let Some(ref label) = continue_stmt.label {
                    self.output.push(' ');
                    self.output.push_str(label);
                }
                self.output.push_str(";\n");
            }
            Stmt::Block(block) => {
                self.writeln("{");
                self.indent();
                self.visit_block(block);
                self.dedent();
                self.writeln("}");
            }
            Stmt::Empty => {
                self.writeln(";");
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => {
                self.output.push_str(&literal.value.to_string());
            }
            Expr::Identifier(identifier) => {
                self.output.push_str(&identifier.name);
            }
            Expr::Binary(binary) => {
                self.visit_expr(&binary.left);
                self.output.push(' ');
                self.output.push_str(binary.operator.symbol());
                self.output.push(' ');
                self.visit_expr(&binary.right);
            }
            Expr::Unary(unary) => {
                if unary.operator.is_postfix() {
                    self.visit_expr(&unary.operand);
                    self.output.push_str(unary.operator.symbol());
                } else {
                    self.output.push_str(unary.operator.symbol());
                    self.visit_expr(&unary.operand);
                }
            }
            Expr::Assignment(assignment) => {
                self.visit_expr(&assignment.target);
                self.output.push(' ');
                self.output.push_str(assignment.operator.symbol());
                self.output.push(' ');
                self.visit_expr(&assignment.value);
            }
            Expr::MethodCall(method_call) => {
                if let Some(ref target) = method_call.target {
                    self.visit_expr(target);
                    self.output.push('.');
                }
                self.output.push_str(&method_call.name);
                self.output.push('(');
                for (i, arg) in method_call.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.visit_expr(arg);
                }
                self.output.push(')');
            }
            Expr::FieldAccess(field_access) => {
                if let Some(ref target) = field_access.target {
                    self.visit_expr(target);
                    self.output.push('.');
                }
                self.output.push_str(&field_access.name);
            }
            Expr::ArrayAccess(array_access) => {
                self.visit_expr(&array_access.array);
                self.output.push('[');
                self.visit_expr(&array_access.index);
                self.output.push(']');
            }
            Expr::Conditional(conditional) => {
                self.visit_expr(&conditional.condition);
                self.output.push_str(" ? ");
                self.visit_expr(&conditional.then_expr);
                self.output.push_str(" : ");
                self.visit_expr(&conditional.else_expr);
            }
            Expr::New(new) => {
                self.output.push_str("new ");
                self.visit_type_ref(&new.target_type);
                self.output.push('(');
                for (i, arg) in new.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.visit_expr(arg);
                }
                self.output.push(')');
            }
            Expr::Parenthesized(inner) => {
                self.output.push('(');
                self.visit_expr(inner);
                self.output.push(')');
            }
        }
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        self.output.push_str(&type_ref.name);

        if !type_ref.type_args.is_empty() {
            self.output.push('<');
            for (i, arg) in type_ref.type_args.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.visit_type_ref(arg);
            }
            self.output.push('>');
        }

        for _ in 0..type_ref.array_dims {
            self.output.push_str("[]");
        }
    }
}

impl AstPrinter {
    /// Render a loop or branch body. Blocks open on the current line;
    /// any other statement goes on its own indented line.
    fn visit_stmt_as_branch(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                self.output.push_str("{\n");
                self.indent();
                self.visit_block(block);
                self.dedent();
                self.writeln("}");
            }
            other => {
                self.output.push('\n');
                self.indent();
                self.visit_stmt(other);
                self.dedent();
            }
        }
    }

    /// Render a statement without trailing semicolon or newline, for
    /// for-loop headers
    fn visit_stmt_inline(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr_stmt) => self.visit_expr(&expr_stmt.expr),
            Stmt::Declaration(var_decl) => {
                self.visit_type_ref(&var_decl.type_ref);
                self.output.push(' ');
                self.write_var_declarators(&var_decl.variables);
            }
            other => self.visit_stmt(other),
        }
    }
}
