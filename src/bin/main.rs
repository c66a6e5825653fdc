use anyhow::Result;
use clap::{Parser, Subcommand};
use jdesugar::ast::TreeDumper;
use jdesugar::desugar::Desugarer;
use jdesugar::parser::{parse_java, Lexer};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jdesugar")]
#[command(about = "Java AST desugaring toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lexically analyze a .java file
    Lex {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token locations
        #[arg(short, long)]
        locations: bool,
    },

    /// Parse a .java file and dump its tree one node per line
    Dump {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Spaces of indentation per tree level
        #[arg(short, long, default_value_t = 2)]
        tab_size: usize,

        /// Desugar loops before dumping
        #[arg(short, long)]
        desugared: bool,
    },

    /// Desugar a .java file and print the rewritten source
    Desugar {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Lex { input, locations } => {
            lex_file(input, *locations)?;
        }
        Commands::Dump {
            input,
            tab_size,
            desugared,
        } => {
            dump_file(input, *tab_size, *desugared)?;
        }
        Commands::Desugar { input } => {
            desugar_file(input)?;
        }
    }

    Ok(())
}

fn lex_file(input: &PathBuf, locations: bool) -> Result<()> {
    let source = fs::read_to_string(input)?;

    let tokens = Lexer::new(&source)
        .tokenize()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    for token in &tokens {
        if locations {
            println!(
                "{:?} '{}' at {}:{}",
                token.token_type(),
                token.lexeme(),
                token.location().line,
                token.location().column
            );
        } else {
            println!("{:?} '{}'", token.token_type(), token.lexeme());
        }
    }
    println!("{} tokens", tokens.len());

    Ok(())
}

fn dump_file(input: &PathBuf, tab_size: usize, desugared: bool) -> Result<()> {
    let source = fs::read_to_string(input)?;

    let mut ast = parse_java(&source)?;
    if desugared {
        ast = Desugarer::new().desugar(ast)?;
    }

    let mut dumper = TreeDumper::new(tab_size);
    print!("{}", dumper.dump(&ast));

    Ok(())
}

fn desugar_file(input: &PathBuf) -> Result<()> {
    let source = fs::read_to_string(input)?;

    let ast = parse_java(&source)?;
    let ast = Desugarer::new().desugar(ast)?;

    print!("{}", ast);

    Ok(())
}
