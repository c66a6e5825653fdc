//! Parser module for Java source files
//!
//! Produces an AST from source text via a logos lexer and a recursive
//! descent parser.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, LexicalToken, Token};
pub use parser::Parser;

use crate::ast::Ast;
use crate::error::Result;

/// Parse Java source code into an AST
pub fn parse_java(source: &str) -> Result<Ast> {
    let parser = Parser::new(source)?;
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn parse_method_body(body: &str) -> Vec<Stmt> {
        let source = format!("class T {{ void m() {{ {} }} }}", body);
        let ast = parse_java(&source).expect("Failed to parse");
        let class = &ast.classes[0];
        match &class.body[0] {
            ClassMember::Method(method) => {
                method.body.as_ref().expect("method has no body").statements.clone()
            }
            other => panic!("expected method, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_compilation_unit() {
        let source = r#"
            package edu.example.loops;

            import java.util.List;
            import java.util.*;

            public class Poem {
                private int lines = 0;

                public void recite() {
                }
            }
        "#;

        let ast = parse_java(source).expect("Failed to parse");

        assert_eq!(ast.package_decl.as_ref().unwrap().name, "edu.example.loops");
        assert_eq!(ast.imports.len(), 2);
        assert!(!ast.imports[0].is_wildcard);
        assert!(ast.imports[1].is_wildcard);
        assert_eq!(ast.classes.len(), 1);
        assert_eq!(ast.classes[0].name, "Poem");
        assert_eq!(ast.classes[0].modifiers, vec![Modifier::Public]);
        assert_eq!(ast.classes[0].body.len(), 2);
    }

    #[test]
    fn test_parse_for_with_multiple_declarators() {
        let stmts = parse_method_body("for (int x = 10, y = 1; x > y; x--, y += 2) f(x, y);");

        let for_stmt = match &stmts[0] {
            Stmt::For(f) => f,
            other => panic!("expected for, got {:?}", other),
        };

        assert_eq!(for_stmt.init.len(), 1);
        match &for_stmt.init[0] {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.type_ref.name, "int");
                assert_eq!(decl.variables.len(), 2);
                assert_eq!(decl.variables[0].name, "x");
                assert_eq!(decl.variables[1].name, "y");
            }
            other => panic!("expected declaration, got {:?}", other),
        }
        assert!(for_stmt.condition.is_some());
        assert_eq!(for_stmt.update.len(), 2);
    }

    #[test]
    fn test_parse_empty_for_header() {
        let stmts = parse_method_body("for (;;) tick();");

        let for_stmt = match &stmts[0] {
            Stmt::For(f) => f,
            other => panic!("expected for, got {:?}", other),
        };

        assert!(for_stmt.init.is_empty());
        assert!(for_stmt.condition.is_none());
        assert!(for_stmt.update.is_empty());
        assert!(matches!(*for_stmt.body, Stmt::Expression(_)));
    }

    #[test]
    fn test_parse_for_each() {
        let stmts = parse_method_body("for (String s : poem.getLines()) { print(s); }");

        let for_each = match &stmts[0] {
            Stmt::ForEach(f) => f,
            other => panic!("expected for-each, got {:?}", other),
        };

        assert_eq!(for_each.var_type.name, "String");
        assert_eq!(for_each.var_name, "s");
        assert!(matches!(for_each.iterable, Expr::MethodCall(_)));
        assert!(matches!(*for_each.body, Stmt::Block(_)));
    }

    #[test]
    fn test_parse_generic_type_in_declaration() {
        let stmts = parse_method_body("java.util.List<String> lines = java.util.Collections.emptyList();");

        match &stmts[0] {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.type_ref.name, "java.util.List");
                assert_eq!(decl.type_ref.type_args.len(), 1);
                assert_eq!(decl.type_ref.type_args[0].name, "String");
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_generic_type() {
        let stmts = parse_method_body("Map<String, List<Integer>> index = build();");

        match &stmts[0] {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.type_ref.name, "Map");
                assert_eq!(decl.type_ref.type_args.len(), 2);
                assert_eq!(decl.type_ref.type_args[1].name, "List");
                assert_eq!(decl.type_ref.type_args[1].type_args[0].name, "Integer");
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_expression_precedence() {
        let stmts = parse_method_body("x = a + b * c < d && !e;");

        let expr = match &stmts[0] {
            Stmt::Expression(stmt) => &stmt.expr,
            other => panic!("expected expression, got {:?}", other),
        };

        // Assignment at the root, '&&' below it
        let assignment = match expr {
            Expr::Assignment(a) => a,
            other => panic!("expected assignment, got {:?}", other),
        };
        match assignment.value.as_ref() {
            Expr::Binary(binary) => assert_eq!(binary.operator, BinaryOp::LogicalAnd),
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_postfix_and_calls() {
        let stmts = parse_method_body("poem.lines().size();");

        let expr = match &stmts[0] {
            Stmt::Expression(stmt) => &stmt.expr,
            other => panic!("expected expression, got {:?}", other),
        };

        let outer = match expr {
            Expr::MethodCall(call) => call,
            other => panic!("expected call, got {:?}", other),
        };
        assert_eq!(outer.name, "size");
        match outer.target.as_deref() {
            Some(Expr::MethodCall(inner)) => assert_eq!(inner.name, "lines"),
            other => panic!("expected inner call, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_location() {
        let source = "class T { void m() { int = 5; } }";
        let err = parse_java(source).expect_err("parse should fail");
        let message = err.to_string();
        assert!(message.contains("line"), "unexpected message: {}", message);
    }
}
