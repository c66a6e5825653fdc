use jdesugar::ast::{count_stmts, stmts, Ast, ClassMember, Expr, Stmt};
use jdesugar::desugar_source;

/// Tests for the enhanced for loop rewrite.
///
/// Every `for (Type v : iterable) body` must come out as a block that
/// declares `java.util.Iterator<Type> vIter = iterable.iterator()` and
/// loops `while (vIter.hasNext())` with `Type v = vIter.next();` as the
/// first body statement.

fn desugar(body: &str) -> Ast {
    let source = format!(
        "class T {{ void m(java.util.List<String> lines) {{ {} }} }}",
        body
    );
    desugar_source(&source).expect("Failed to desugar")
}

fn first_stmt(ast: &Ast) -> &Stmt {
    match &ast.classes[0].body[0] {
        ClassMember::Method(method) => {
            &method.body.as_ref().expect("no method body").statements[0]
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_iterator_declaration_shape() {
    let ast = desugar("for (String s : lines) { print(s); }");

    let outer = match first_stmt(&ast) {
        Stmt::Block(block) => block,
        other => panic!("expected block, got {:?}", other),
    };
    assert_eq!(outer.statements.len(), 2);

    let decl = match &outer.statements[0] {
        Stmt::Declaration(decl) => decl,
        other => panic!("expected iterator declaration, got {:?}", other),
    };
    assert_eq!(decl.type_ref.name, "java.util.Iterator");
    assert_eq!(decl.type_ref.type_args.len(), 1);
    assert_eq!(decl.type_ref.type_args[0].name, "String");
    assert_eq!(decl.variables.len(), 1);
    assert_eq!(decl.variables[0].name, "sIter");

    // Initialized from iterable.iterator()
    match decl.variables[0].initializer.as_ref() {
        Some(Expr::MethodCall(call)) => {
            assert_eq!(call.name, "iterator");
            assert!(call.arguments.is_empty());
            match call.target.as_deref() {
                Some(Expr::Identifier(ident)) => assert_eq!(ident.name, "lines"),
                other => panic!("expected identifier target, got {:?}", other),
            }
        }
        other => panic!("expected iterator() call, got {:?}", other),
    }
}

#[test]
fn test_while_guard_calls_has_next() {
    let ast = desugar("for (String s : lines) { print(s); }");

    let while_stmt = stmts(&ast)
        .find_map(|s| match s {
            Stmt::While(w) => Some(w),
            _ => None,
        })
        .expect("no while produced");

    match &while_stmt.condition {
        Expr::MethodCall(call) => {
            assert_eq!(call.name, "hasNext");
            match call.target.as_deref() {
                Some(Expr::Identifier(ident)) => assert_eq!(ident.name, "sIter"),
                other => panic!("expected iterator identifier, got {:?}", other),
            }
        }
        other => panic!("expected hasNext() guard, got {:?}", other),
    }
}

#[test]
fn test_next_declaration_comes_first_in_body() {
    let ast = desugar("for (String s : lines) { print(s); count(s); }");

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
    assert_eq!(body.statements.len(), 3);

    let decl = match &body.statements[0] {
        Stmt::Declaration(decl) => decl,
        other => panic!("expected loop variable declaration, got {:?}", other),
    };
    assert_eq!(decl.type_ref.name, "String");
    assert_eq!(decl.variables[0].name, "s");
    match decl.variables[0].initializer.as_ref() {
        Some(Expr::MethodCall(call)) => assert_eq!(call.name, "next"),
        other => panic!("expected next() call, got {:?}", other),
    }
}

#[test]
fn test_single_statement_body_gets_wrapped() {
    let ast = desugar("for (String s : lines) print(s);");

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
    // next() declaration plus the original statement
    assert_eq!(body.statements.len(), 2);
}

#[test]
fn test_generic_element_type_is_preserved() {
    let source = r#"
        class T {
            void m(java.util.List<java.util.List<Integer>> rows) {
                for (java.util.List<Integer> row : rows) use(row);
            }
        }
    "#;
    let ast = desugar_source(source).expect("Failed to desugar");

    let decl = stmts(&ast)
        .find_map(|s| match s {
            Stmt::Declaration(d) if d.type_ref.name == "java.util.Iterator" => Some(d),
            _ => None,
        })
        .expect("no iterator declaration");

    assert_eq!(decl.type_ref.type_args[0].name, "java.util.List");
    assert_eq!(decl.type_ref.type_args[0].type_args[0].name, "Integer");
}

#[test]
fn test_nested_loops_of_both_kinds_disappear() {
    let ast = desugar(
        "for (int i = 0; i < 2; i++) { for (String s : lines) { use(i, s); } }",
    );

    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::For(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::ForEach(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::While(_))), 2);
}

#[test]
fn test_foreach_wrapping_a_for_loop() {
    let ast = desugar(
        "for (String s : lines) { for (int i = 0; i < 2; i++) { use(i, s); } }",
    );

    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::For(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::ForEach(_))), 0);
    assert_eq!(count_stmts(&ast, |s| matches!(s, Stmt::While(_))), 2);
}
