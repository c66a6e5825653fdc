use jdesugar::ast::{count_stmts, Stmt, TreeDumper};
use jdesugar::{desugar_source, parse_source};

/// End-to-end tests: parse, desugar, print, and dump working together.

const POEM_SOURCE: &str = r#"
    package edu.example.loops;

    import java.util.List;

    public class Poem {
        private int recitals = 0;

        public void recite(List<String> lines) {
            for (int round = 0; round < 2; round++) {
                for (String line : lines) {
                    speak(line);
                }
            }
            recitals++;
        }
    }
"#;

#[test]
fn test_printed_output_reparses_without_loops() {
    let ast = desugar_source(POEM_SOURCE).expect("Failed to desugar");

    // The printer emits valid Java, so the rewritten tree survives a
    // second trip through the parser
    let printed = ast.to_string();
    let reparsed = parse_source(&printed).expect("printed output failed to reparse");

    assert_eq!(count_stmts(&reparsed, |s| matches!(s, Stmt::For(_))), 0);
    assert_eq!(count_stmts(&reparsed, |s| matches!(s, Stmt::ForEach(_))), 0);
    assert_eq!(count_stmts(&reparsed, |s| matches!(s, Stmt::While(_))), 2);
}

#[test]
fn test_printed_output_contains_iterator_plumbing() {
    let ast = desugar_source(POEM_SOURCE).expect("Failed to desugar");
    let printed = ast.to_string();

    assert!(printed.contains("java.util.Iterator<String> lineIter = lines.iterator();"));
    assert!(printed.contains("while (lineIter.hasNext())"));
    assert!(printed.contains("String line = lineIter.next();"));
    assert!(!printed.contains("for ("));
}

#[test]
fn test_dump_lists_one_node_per_line() {
    let ast = parse_source(POEM_SOURCE).expect("Failed to parse");

    let mut dumper = TreeDumper::new(2);
    let dump = dumper.dump(&ast);
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines[0], "CompilationUnit");
    assert_eq!(lines[1], "  PackageDecl name=\"edu.example.loops\"");
    assert!(lines
        .iter()
        .any(|l| l.trim_start() == "ClassDecl name=\"Poem\""));
    assert!(lines.iter().any(|l| l.trim_start().starts_with("ForStmt")));
    assert!(lines
        .iter()
        .any(|l| l.trim_start().starts_with("ForEachStmt var=\"line\"")));
}

#[test]
fn test_dump_honors_tab_size() {
    let ast = parse_source("class T { int x; }").expect("Failed to parse");

    let mut dumper = TreeDumper::new(4);
    let dump = dumper.dump(&ast);
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines[0], "CompilationUnit");
    assert!(lines[1].starts_with("    ClassDecl"));
    assert!(lines[2].starts_with("        FieldDecl"));
}

#[test]
fn test_dump_of_desugared_tree_has_no_loop_nodes() {
    let ast = desugar_source(POEM_SOURCE).expect("Failed to desugar");

    let mut dumper = TreeDumper::new(2);
    let dump = dumper.dump(&ast);

    assert!(!dump.contains("ForStmt"));
    assert!(!dump.contains("ForEachStmt"));
    assert!(dump.contains("WhileStmt"));
}

#[test]
fn test_desugar_is_identity_on_loop_free_source() {
    let source = r#"
        class Calm {
            int total(int a, int b) {
                int sum = a + b;
                while (sum > 100) {
                    sum -= 10;
                }
                return sum;
            }
        }
    "#;

    let plain = parse_source(source).expect("Failed to parse");
    let desugared = desugar_source(source).expect("Failed to desugar");

    assert_eq!(plain.to_string(), desugared.to_string());
}
