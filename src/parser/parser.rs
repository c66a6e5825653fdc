//! Recursive descent parser for the supported Java subset
//!
//! This module converts tokens into AST nodes.

use super::{
    error::ParseError,
    lexer::{Lexer, LexicalToken, Token},
};
use crate::ast::*;
use crate::error::Result;

/// Parser for Java source files
pub struct Parser {
    tokens: Vec<LexicalToken>,
    current: usize,
}

impl Parser {
    /// Create a new parser from source code
    pub fn new(source: &str) -> Result<Self> {
        let lexer = Lexer::new(source);
        let tokens = lexer
            .tokenize()
            .map_err(|e| ParseError::lexical_error(e))?;

        Ok(Self { tokens, current: 0 })
    }

    /// Parse the source code into an AST
    pub fn parse(mut self) -> Result<Ast> {
        let start_span = self.current_span();

        let package_decl = if self.check(&Token::Package) {
            Some(self.parse_package_decl()?)
        } else {
            None
        };

        let mut imports = Vec::new();
        while self.check(&Token::Import) {
            imports.push(self.parse_import_decl()?);
        }

        let mut classes = Vec::new();
        while !self.is_at_end() {
            classes.push(self.parse_class_decl()?);
        }

        let end_span = self.previous_span();
        let span = Span::new(start_span.start, end_span.end);

        Ok(Ast {
            package_decl,
            imports,
            classes,
            span,
        })
    }

    // Helper methods
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn check(&self, token_type: &Token) -> bool {
        if self.is_at_end() {
            false
        } else {
            self.peek().token_type() == token_type
        }
    }

    fn advance(&mut self) -> &LexicalToken {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn peek(&self) -> &LexicalToken {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &LexicalToken {
        if self.current == 0 {
            &self.tokens[0]
        } else {
            &self.tokens[self.current - 1]
        }
    }

    fn peek_token_type(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index).map(|t| t.token_type())
    }

    fn current_span(&self) -> Span {
        if self.tokens.is_empty() {
            return Span::default();
        }
        let token = self.peek();
        Span::new(token.location(), token.location())
    }

    fn previous_span(&self) -> Span {
        if self.tokens.is_empty() {
            return Span::default();
        }
        let previous = self.previous();
        Span::new(previous.location(), previous.location())
    }

    fn span_from(&self, start_span: Span) -> Span {
        Span::new(start_span.start, self.previous_span().end)
    }

    fn consume(&mut self, token_type: &Token, expected: &str) -> Result<&LexicalToken> {
        if self.check(token_type) {
            Ok(self.advance())
        } else if self.is_at_end() {
            Err(ParseError::unexpected_end_of_input(expected).into())
        } else {
            let current = self.peek();
            Err(ParseError::unexpected_token(
                expected,
                current.lexeme().to_string(),
                current.location(),
            )
            .into())
        }
    }

    fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let token = self.consume(&Token::Identifier, "identifier")?;
        Ok(token.lexeme().to_string())
    }

    fn parse_qualified_name(&mut self) -> Result<String> {
        let mut name = self.parse_identifier()?;
        while self.check(&Token::Dot)
            && self.peek_token_type(self.current + 1) == Some(&Token::Identifier)
        {
            self.advance(); // '.'
            name.push('.');
            name.push_str(&self.parse_identifier()?);
        }
        Ok(name)
    }

    // Package declaration parsing
    fn parse_package_decl(&mut self) -> Result<PackageDecl> {
        let start_span = self.current_span();

        self.consume(&Token::Package, "'package'")?;
        let name = self.parse_qualified_name()?;
        self.consume(&Token::Semicolon, "';' after package name")?;

        Ok(PackageDecl {
            name,
            span: self.span_from(start_span),
        })
    }

    // Import declaration parsing
    fn parse_import_decl(&mut self) -> Result<ImportDecl> {
        let start_span = self.current_span();

        self.consume(&Token::Import, "'import'")?;
        let name = self.parse_qualified_name()?;

        // Trailing '.*' marks a wildcard import
        let is_wildcard = if self.check(&Token::Dot) {
            self.advance();
            self.consume(&Token::Star, "'*' after '.' in import")?;
            true
        } else {
            false
        };

        self.consume(&Token::Semicolon, "';' after import")?;

        Ok(ImportDecl {
            name,
            is_wildcard,
            span: self.span_from(start_span),
        })
    }

    // Class declaration parsing
    fn parse_class_decl(&mut self) -> Result<ClassDecl> {
        let start_span = self.current_span();

        let modifiers = self.parse_modifiers();
        self.consume(&Token::Class, "'class'")?;
        let name = self.parse_identifier()?;

        let extends = if self.match_token(&Token::Extends) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };

        self.consume(&Token::LBrace, "'{' to open class body")?;

        let mut body = Vec::new();
        while !self.check(&Token::RBrace) && !self.is_at_end() {
            body.extend(self.parse_class_member()?);
        }

        self.consume(&Token::RBrace, "'}' to close class body")?;

        Ok(ClassDecl {
            modifiers,
            name,
            extends,
            body,
            span: self.span_from(start_span),
        })
    }

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while !self.is_at_end() {
            let modifier = match self.peek().token_type() {
                Token::Public => Modifier::Public,
                Token::Protected => Modifier::Protected,
                Token::Private => Modifier::Private,
                Token::Static => Modifier::Static,
                Token::Final => Modifier::Final,
                _ => break,
            };
            self.advance();
            modifiers.push(modifier);
        }
        modifiers
    }

    /// Parse a field or method declaration. Comma-separated field
    /// declarators expand into one `FieldDecl` per variable.
    fn parse_class_member(&mut self) -> Result<Vec<ClassMember>> {
        let start_span = self.current_span();

        let modifiers = self.parse_modifiers();

        let return_type = if self.match_token(&Token::Void) {
            None
        } else {
            Some(self.parse_type_ref()?)
        };

        let name = self.parse_identifier()?;

        if self.check(&Token::LParen) {
            let method = self.parse_method_rest(modifiers, return_type, name, start_span)?;
            return Ok(vec![ClassMember::Method(method)]);
        }

        // Field declaration; `void` is not a field type
        let type_ref = return_type.ok_or_else(|| {
            ParseError::invalid_syntax("fields may not have type 'void'", start_span.start)
        })?;

        let mut members = Vec::new();
        let mut field_name = name;
        loop {
            let initializer = if self.match_token(&Token::Assign) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            members.push(ClassMember::Field(FieldDecl {
                modifiers: modifiers.clone(),
                type_ref: type_ref.clone(),
                name: field_name,
                initializer,
                span: self.span_from(start_span),
            }));

            if self.match_token(&Token::Comma) {
                field_name = self.parse_identifier()?;
            } else {
                break;
            }
        }
        self.consume(&Token::Semicolon, "';' after field declaration")?;

        Ok(members)
    }

    fn parse_method_rest(
        &mut self,
        modifiers: Vec<Modifier>,
        return_type: Option<TypeRef>,
        name: String,
        start_span: Span,
    ) -> Result<MethodDecl> {
        self.consume(&Token::LParen, "'(' before parameters")?;

        let mut parameters = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                let param_span = self.current_span();
                let type_ref = self.parse_type_ref()?;
                let param_name = self.parse_identifier()?;
                parameters.push(Parameter {
                    type_ref,
                    name: param_name,
                    span: self.span_from(param_span),
                });
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }

        self.consume(&Token::RParen, "')' after parameters")?;

        let body = if self.check(&Token::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume(&Token::Semicolon, "';' or method body")?;
            None
        };

        Ok(MethodDecl {
            modifiers,
            return_type,
            name,
            parameters,
            body,
            span: self.span_from(start_span),
        })
    }

    // Type parsing
    fn parse_type_ref(&mut self) -> Result<TypeRef> {
        let start_span = self.current_span();

        let name = if !self.is_at_end() && self.peek().token_type().is_primitive_type() {
            self.advance().lexeme().to_string()
        } else {
            self.parse_qualified_name()?
        };

        // Type arguments; '<>' is the diamond form
        let mut type_args = Vec::new();
        if self.match_token(&Token::Lt) {
            if !self.check(&Token::Gt) {
                loop {
                    type_args.push(self.parse_type_ref()?);
                    if !self.match_token(&Token::Comma) {
                        break;
                    }
                }
            }
            self.consume(&Token::Gt, "'>' to close type arguments")?;
        }

        let mut array_dims = 0;
        while self.match_token(&Token::LBracket) {
            self.consume(&Token::RBracket, "']' in array type")?;
            array_dims += 1;
        }

        Ok(TypeRef {
            name,
            type_args,
            array_dims,
            span: self.span_from(start_span),
        })
    }

    /// Scan ahead to decide whether the current position starts a local
    /// variable declaration rather than an expression. The distinguishing
    /// shape is a type followed by an identifier.
    fn looks_like_var_decl(&self) -> bool {
        let mut i = self.current;

        match self.peek_token_type(i) {
            Some(t) if t.is_primitive_type() => return true,
            Some(Token::Identifier) => i += 1,
            _ => return false,
        }

        // Qualified name segments
        while self.peek_token_type(i) == Some(&Token::Dot)
            && self.peek_token_type(i + 1) == Some(&Token::Identifier)
        {
            i += 2;
        }

        // Balanced type-argument section
        if self.peek_token_type(i) == Some(&Token::Lt) {
            let mut depth = 0usize;
            loop {
                match self.peek_token_type(i) {
                    Some(Token::Lt) => depth += 1,
                    Some(Token::Gt) => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    Some(Token::Identifier) | Some(Token::Dot) | Some(Token::Comma) => {}
                    Some(t) if t.is_primitive_type() => {}
                    _ => return false,
                }
                i += 1;
            }
        }

        // Array dimensions
        while self.peek_token_type(i) == Some(&Token::LBracket)
            && self.peek_token_type(i + 1) == Some(&Token::RBracket)
        {
            i += 2;
        }

        self.peek_token_type(i) == Some(&Token::Identifier)
    }

    // Statement parsing
    fn parse_block(&mut self) -> Result<Block> {
        let start_span = self.current_span();

        self.consume(&Token::LBrace, "'{' to open block")?;

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.consume(&Token::RBrace, "'}' to close block")?;

        Ok(Block::new(statements, self.span_from(start_span)))
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        if self.is_at_end() {
            return Err(ParseError::unexpected_end_of_input("statement").into());
        }

        match self.peek().token_type() {
            Token::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::For => self.parse_for_stmt(),
            Token::Return => self.parse_return_stmt(),
            Token::Break => self.parse_break_stmt(),
            Token::Continue => self.parse_continue_stmt(),
            Token::Semicolon => {
                self.advance();
                Ok(Stmt::Empty)
            }
            _ => {
                if self.looks_like_var_decl() {
                    let decl = self.parse_var_decl()?;
                    self.consume(&Token::Semicolon, "';' after variable declaration")?;
                    Ok(Stmt::Declaration(decl))
                } else {
                    let stmt = self.parse_expr_stmt()?;
                    self.consume(&Token::Semicolon, "';' after expression")?;
                    Ok(Stmt::Expression(stmt))
                }
            }
        }
    }

    /// Parse a variable declaration without its trailing semicolon, so the
    /// same production serves statements and for-loop headers.
    fn parse_var_decl(&mut self) -> Result<VarDeclStmt> {
        let start_span = self.current_span();

        let type_ref = self.parse_type_ref()?;

        let mut variables = Vec::new();
        loop {
            let var_span = self.current_span();
            let name = self.parse_identifier()?;
            let initializer = if self.match_token(&Token::Assign) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            variables.push(VariableDeclarator {
                name,
                initializer,
                span: self.span_from(var_span),
            });
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        Ok(VarDeclStmt {
            type_ref,
            variables,
            span: self.span_from(start_span),
        })
    }

    fn parse_expr_stmt(&mut self) -> Result<ExprStmt> {
        let start_span = self.current_span();
        let expr = self.parse_expression()?;
        Ok(ExprStmt {
            expr,
            span: self.span_from(start_span),
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::If, "'if'")?;
        self.consume(&Token::LParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(&Token::RParen, "')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(&Token::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start_span),
        }))
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::While, "'while'")?;
        self.consume(&Token::LParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(&Token::RParen, "')' after while condition")?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span: self.span_from(start_span),
        }))
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::For, "'for'")?;
        self.consume(&Token::LParen, "'(' after 'for'")?;

        // Enhanced form: 'Type name :' distinguishes it from the
        // three-pronged header. Backtrack if the shape does not match.
        let saved = self.current;
        if self.looks_like_var_decl() {
            if let Ok(var_type) = self.parse_type_ref() {
                if let Ok(var_name) = self.parse_identifier() {
                    if self.match_token(&Token::Colon) {
                        let iterable = self.parse_expression()?;
                        self.consume(&Token::RParen, "')' after for-each header")?;
                        let body = Box::new(self.parse_statement()?);
                        return Ok(Stmt::ForEach(ForEachStmt {
                            var_type,
                            var_name,
                            iterable,
                            body,
                            span: self.span_from(start_span),
                        }));
                    }
                }
            }
        }
        self.current = saved;

        let init = if self.check(&Token::Semicolon) {
            Vec::new()
        } else if self.looks_like_var_decl() {
            vec![Stmt::Declaration(self.parse_var_decl()?)]
        } else {
            let mut stmts = Vec::new();
            loop {
                stmts.push(Stmt::Expression(self.parse_expr_stmt()?));
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
            stmts
        };
        self.consume(&Token::Semicolon, "';' after for initializer")?;

        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(&Token::Semicolon, "';' after for condition")?;

        let mut update = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                update.push(self.parse_expr_stmt()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.consume(&Token::RParen, "')' after for header")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For(ForStmt {
            init,
            condition,
            update,
            body,
            span: self.span_from(start_span),
        }))
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::Return, "'return'")?;
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(&Token::Semicolon, "';' after return")?;

        Ok(Stmt::Return(ReturnStmt {
            value,
            span: self.span_from(start_span),
        }))
    }

    fn parse_break_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::Break, "'break'")?;
        let label = if self.check(&Token::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume(&Token::Semicolon, "';' after break")?;

        Ok(Stmt::Break(BreakStmt {
            label,
            span: self.span_from(start_span),
        }))
    }

    fn parse_continue_stmt(&mut self) -> Result<Stmt> {
        let start_span = self.current_span();

        self.consume(&Token::Continue, "'continue'")?;
        let label = if self.check(&Token::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume(&Token::Semicolon, "';' after continue")?;

        Ok(Stmt::Continue(ContinueStmt {
            label,
            span: self.span_from(start_span),
        }))
    }

    // Expression parsing, lowest precedence first
    fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let expr = self.parse_ternary()?;

        let operator = if self.is_at_end() {
            None
        } else {
            match self.peek().token_type() {
                Token::Assign => Some(AssignmentOp::Assign),
                Token::AddAssign => Some(AssignmentOp::AddAssign),
                Token::SubAssign => Some(AssignmentOp::SubAssign),
                Token::MulAssign => Some(AssignmentOp::MulAssign),
                Token::DivAssign => Some(AssignmentOp::DivAssign),
                Token::ModAssign => Some(AssignmentOp::ModAssign),
                _ => None,
            }
        };

        if let Some(operator) = operator {
            self.advance();
            // Right associative
            let value = self.parse_assignment()?;
            return Ok(Expr::Assignment(AssignmentExpr {
                target: Box::new(expr),
                operator,
                value: Box::new(value),
                span: self.span_from(start_span),
            }));
        }

        Ok(expr)
    }

    fn parse_ternary(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let condition = self.parse_logical_or()?;

        if self.match_token(&Token::Question) {
            let then_expr = self.parse_expression()?;
            self.consume(&Token::Colon, "':' in conditional expression")?;
            let else_expr = self.parse_expression()?;
            return Ok(Expr::Conditional(ConditionalExpr {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span: self.span_from(start_span),
            }));
        }

        Ok(condition)
    }

    fn parse_logical_or(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_logical_and()?;

        while self.match_token(&Token::PipePipe) {
            let right = self.parse_logical_and()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator: BinaryOp::LogicalOr,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_equality()?;

        while self.match_token(&Token::AndAnd) {
            let right = self.parse_equality()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator: BinaryOp::LogicalAnd,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_relational()?;

        loop {
            let operator = if self.match_token(&Token::Eq) {
                BinaryOp::Eq
            } else if self.match_token(&Token::Ne) {
                BinaryOp::Ne
            } else {
                break;
            };
            let right = self.parse_relational()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_additive()?;

        loop {
            let operator = if self.match_token(&Token::Lt) {
                BinaryOp::Lt
            } else if self.match_token(&Token::Le) {
                BinaryOp::Le
            } else if self.match_token(&Token::Gt) {
                BinaryOp::Gt
            } else if self.match_token(&Token::Ge) {
                BinaryOp::Ge
            } else {
                break;
            };
            let right = self.parse_additive()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_multiplicative()?;

        loop {
            let operator = if self.match_token(&Token::Plus) {
                BinaryOp::Add
            } else if self.match_token(&Token::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_unary()?;

        loop {
            let operator = if self.match_token(&Token::Star) {
                BinaryOp::Mul
            } else if self.match_token(&Token::Slash) {
                BinaryOp::Div
            } else if self.match_token(&Token::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let right = self.parse_unary()?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span: self.span_from(start_span),
            });
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let start_span = self.current_span();

        let operator = if self.is_at_end() {
            None
        } else {
            match self.peek().token_type() {
                Token::Bang => Some(UnaryOp::Not),
                Token::Minus => Some(UnaryOp::Minus),
                Token::Plus => Some(UnaryOp::Plus),
                Token::Inc => Some(UnaryOp::PreInc),
                Token::Dec => Some(UnaryOp::PreDec),
                _ => None,
            }
        };

        if let Some(operator) = operator {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryExpr {
                operator,
                operand: Box::new(operand),
                span: self.span_from(start_span),
            }));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let start_span = self.current_span();
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(&Token::Dot) {
                let name = self.parse_identifier()?;
                if self.check(&Token::LParen) {
                    let arguments = self.parse_arguments()?;
                    expr = Expr::MethodCall(MethodCallExpr {
                        target: Some(Box::new(expr)),
                        name,
                        arguments,
                        span: self.span_from(start_span),
                    });
                } else {
                    expr = Expr::FieldAccess(FieldAccessExpr {
                        target: Some(Box::new(expr)),
                        name,
                        span: self.span_from(start_span),
                    });
                }
            } else if self.check(&Token::LParen) {
                // A call directly after a bare name is an unqualified call
                let name = match expr {
                    Expr::Identifier(ident) => ident.name,
                    _ => {
                        return Err(ParseError::invalid_syntax(
                            "expected method name before '('",
                            self.peek().location(),
                        )
                        .into())
                    }
                };
                let arguments = self.parse_arguments()?;
                expr = Expr::MethodCall(MethodCallExpr {
                    target: None,
                    name,
                    arguments,
                    span: self.span_from(start_span),
                });
            } else if self.match_token(&Token::LBracket) {
                let index = self.parse_expression()?;
                self.consume(&Token::RBracket, "']' after array index")?;
                expr = Expr::ArrayAccess(ArrayAccessExpr {
                    array: Box::new(expr),
                    index: Box::new(index),
                    span: self.span_from(start_span),
                });
            } else if self.match_token(&Token::Inc) {
                expr = Expr::Unary(UnaryExpr {
                    operator: UnaryOp::PostInc,
                    operand: Box::new(expr),
                    span: self.span_from(start_span),
                });
            } else if self.match_token(&Token::Dec) {
                expr = Expr::Unary(UnaryExpr {
                    operator: UnaryOp::PostDec,
                    operand: Box::new(expr),
                    span: self.span_from(start_span),
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        self.consume(&Token::LParen, "'(' before arguments")?;

        let mut arguments = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }

        self.consume(&Token::RParen, "')' after arguments")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.is_at_end() {
            return Err(ParseError::unexpected_end_of_input("expression").into());
        }

        let start_span = self.current_span();
        let location = self.peek().location();

        match self.peek().token_type() {
            Token::DecimalInteger => {
                let lexeme = self.advance().lexeme().replace('_', "");
                let value = lexeme.parse::<i64>().map_err(|_| {
                    ParseError::invalid_syntax(format!("invalid integer '{}'", lexeme), location)
                })?;
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Integer(value),
                    span: start_span,
                }))
            }
            Token::FloatLiteral => {
                let lexeme = self.advance().lexeme().to_string();
                let value = lexeme.parse::<f64>().map_err(|_| {
                    ParseError::invalid_syntax(format!("invalid float '{}'", lexeme), location)
                })?;
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Float(value),
                    span: start_span,
                }))
            }
            Token::StringLiteral => {
                let lexeme = self.advance().lexeme().to_string();
                let value = unescape(&lexeme[1..lexeme.len() - 1]);
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::String(value),
                    span: start_span,
                }))
            }
            Token::CharLiteral => {
                let lexeme = self.advance().lexeme().to_string();
                let value = unescape(&lexeme[1..lexeme.len() - 1]);
                let ch = value.chars().next().ok_or_else(|| {
                    ParseError::invalid_syntax("empty character literal", location)
                })?;
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Char(ch),
                    span: start_span,
                }))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Boolean(true),
                    span: start_span,
                }))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Boolean(false),
                    span: start_span,
                }))
            }
            Token::Null => {
                self.advance();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Null,
                    span: start_span,
                }))
            }
            Token::Identifier => {
                let name = self.parse_identifier()?;
                Ok(Expr::Identifier(IdentifierExpr {
                    name,
                    span: start_span,
                }))
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(&Token::RParen, "')' after expression")?;
                Ok(Expr::Parenthesized(Box::new(expr)))
            }
            Token::New => self.parse_new_expr(),
            _ => {
                let current = self.peek();
                Err(ParseError::unexpected_token(
                    "expression",
                    current.lexeme().to_string(),
                    current.location(),
                )
                .into())
            }
        }
    }

    fn parse_new_expr(&mut self) -> Result<Expr> {
        let start_span = self.current_span();

        self.consume(&Token::New, "'new'")?;
        let target_type = self.parse_type_ref()?;
        let arguments = self.parse_arguments()?;

        Ok(Expr::New(NewExpr {
            target_type,
            arguments,
            span: self.span_from(start_span),
        }))
    }
}

/// Resolve the escape sequences a string or char literal may contain
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                if let Ok(code) = u32::from_str_radix(&digits, 16) {
                    if let Some(decoded) = char::from_u32(code) {
                        out.push(decoded);
                    }
                }
            }
            Some(other) => out.push(other),
            None => break,
        }
    }

    out
}
