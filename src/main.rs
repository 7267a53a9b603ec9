//! Command-line driver: compile a source file and run it, or dump one of
//! the intermediate trees.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use pljit::frontend;
use pljit::utils::dot;
use pljit::{Jit, SourceCode};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pljit", version, about = "JIT compiler for a tiny PL/0-style language")]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Positional arguments for the function's parameters
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    args: Vec<i64>,

    /// What to print
    #[arg(long, value_enum, default_value = "result")]
    emit: EmitKind,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitKind {
    /// Evaluate the function and print its result
    Result,
    /// Print the parse tree as DOT
    ParseTree,
    /// Print the optimized AST as DOT
    Ast,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!("read {} bytes from {}", text.len(), cli.input.display());

    match cli.emit {
        EmitKind::Result => {
            let jit = Jit::new();
            let function = jit.register(&text);
            match function.call(&cli.args) {
                Some(value) => println!("{value}"),
                None => bail!("compilation or evaluation failed"),
            }
        }
        EmitKind::ParseTree => {
            let source = SourceCode::new(&text);
            let tree = frontend::parse(&source)
                .map_err(|error| anyhow::anyhow!("{error}"))
                .context("parsing failed")?;
            print!("{}", dot::parse_tree_to_dot(&tree, &source));
        }
        EmitKind::Ast => {
            let source = SourceCode::new(&text);
            let (mut function, symbols) = frontend::parse_and_analyze(&source)
                .map_err(|error| anyhow::anyhow!("{error}"))
                .context("compilation failed")?;
            pljit::transform::optimize(&mut function, &symbols);
            print!("{}", dot::ast_to_dot(&function));
        }
    }

    Ok(())
}
