use jdesugar::ast::{count_stmts, stmts, Ast, BinaryOp, Expr, Literal, Stmt};
use jdesugar::desugar_source;

/// Tests for the C-style for loop rewrite.
///
/// Every `for (init; condition; update) body` must come out as a block
/// holding the initializers followed by a while loop whose body ends
/// with the updates, and no ForStmt may survive the pass.

fn desugar(body: &str) -> Ast {
    let source = format!("class T {{ void m() {{ {} }} }}", body);
    desugar_source(&source).expect("Failed to desugar")
}

fn method_stmts(ast: &Ast) -> &[Stmt] {
    match &ast.classes[0].body[0] {
        jdesugar::ast::ClassMember::Method(method) => {
            &method.body.as_ref().expect("no method body").statements
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_for_becomes_scoped_while() {
    let ast = desugar("for (int i = 0; i < 3; i++) { poem.append(i); }");

    let outer = match &method_stmts(&ast)[0] {
        Stmt::Block(block) => block,
        other => panic!("expected scoping block, got {:?}", other),
    };

    // Initializer first, then the while loop
    assert_eq!(outer.statements.len(), 2);
    assert!(matches!(outer.statements[0], Stmt::Declaration(_)));

    let while_stmt = match &outer.statements[1] {
        Stmt::While(w) => w,
        other => panic!("expected while, got {:?}", other),
    };
    match &while_stmt.condition {
        Expr::Binary(binary) => assert_eq!(binary.operator, BinaryOp::Lt),
        other => panic!("expected binary condition, got {:?}", other),
    }

    // Body keeps the original statement and gains the update at the end
    let body = match while_stmt.body.as_ref() {
        Stmt::Block(block) => block,
        other => panic!("expected block body, got {:?}", other),
    };
    assert_eq!(body.statements.len(), 2);
    assert!(matches!(body.statements[0], Stmt::Expression(_)));
    assert!(matches!(body.statements[1], Stmt::Expression(_)));
}

#[test]
fn test_missing_condition_becomes_literal_true() {
    let ast = desugar("for (;;) tick();");

    let while_stmt = stmts(&ast)
        .find_map(|s| match s {
            Stmt::While(w) => Some(w),
            _ => None,
        })
        .expect("no while produced");

    match &while_stmt.condition {
        Expr::Literal(literal) => assert_eq!(literal.value, Literal::Boolean(true)),
        other => panic!("expected literal true, got {:?}", other),
    }
}

#[test]
fn test_empty_header_produces_bare_block() {
    let ast = desugar("for (;;) tick();");

    let outer = match &method_stmts(&ast)[0] {
        Stmt::Block(block) => block,
        other => panic!("expected block, got {:?}", other),
    };

    // No initializers, so the scoping block holds only the while loop
    assert_eq!(outer.statements.len(), 1);
    assert!(matches!(outer.statements[0], Stmt::While(_)));
}

#[test]
fn test_non_block_body_gets_wrapped() {
    let ast = desugar("for (int i = 0; i < 3; i++) poem.append(i);");

    let while_stmt = stmts(&ast)
        .find_map(|s| match s {
            Stmt::While(w) => Some(w),
            _ => None,
        })
        .expect("no while produced");

    let body = match while_stmt.body.as_ref() {
        Stmt::Block(block) => block,
        other => panic!("expected block body, got {:?}", other),
    };
    assert_eq!(body.statements.len(), 2);
}

#[test]
fn test_multiple_initializers_become_separate_statements() {
    let ast = desugar("for (int x = 10, y = 1; x > y; x--) f(x, y);");

    let outer = match &method_stmts(&ast)[0] {
        Stmt::Block(block) => block,
        other => panic!("expected scoping block, got {:?}", other),
    };

    // One declaration per variable, in source order, then the while loop
    assert_eq!(outer.statements.len(), 3);
    for (stmt, expected) in outer.statements.iter().zip(["x", "y"]) {
        match stmt {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.variables.len(), 1);
                assert_eq!(decl.variables[0].name, expected);
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }
    assert!(matches!(outer.statements[2], Stmt::While(_)));
}

#[test]
fn test_multiple_updates_keep_order() {
    let ast = desugar("for (int x = 10, y = 1; x > y; x--, y += 2) f(x, y);");

    let while_stmt = stmts(&ast)
        .find_map(|s| match s {
            Stmt::While(w) => Some(w),
            _ => None,
        })
        .expect("no while produced");

    let body = match while_stmt.body.as_ref() {
        Stmt::Block(block) => block,
        other => panic!("expected block body, got {:?}", other),
    };

    // Original call, then x--, then y += 2
    assert_eq!(body.statements.len(), 3);
    let update_1 = match &body.statements[1] {
        Stmt::Expression(stmt) => &stmt.expr,
        other => panic!("expected expression, got {:?}", other),
    };
    assert!(matches!(update_1, Expr::Unary(_)));
    let update_2 = match &body.statements[2] {
        Stmt::Expression(stmt) => &stmt.expr,
        other => panic!("expected expression, got {:?}", other),
    };
    assert!(matches!(update_2, Expr::Assignment(_)));
}

#[test]
fn test_nested_for_loops_all_rewritten() {
    let ast = desugar(
        "for (int i = 0; i < 3; i++) { for (int j = 0; j < 3; j++) { use(i, j); } }",
    );

    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::For(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::While(_))), 2);
}

#[test]
fn test_surrounding_statements_keep_their_places() {
    let ast = desugar("before(); for (int i = 0; i < 3; i++) mid(i); after();");

    let statements = method_stmts(&ast);
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], Stmt::Expression(_)));
    assert!(matches!(statements[1], Stmt::Block(_)));
    assert!(matches!(statements[2], Stmt::Expression(_)));
}

#[test]
fn test_for_inside_if_branch_is_rewritten() {
    let ast = desugar("if (ready) for (int i = 0; i < 3; i++) step(); else rest();");

    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::For(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::While(_))), 1);
}
