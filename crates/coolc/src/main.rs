//! Cool semantic analyzer
//!
//! Usage: coolc [OPTIONS] <input>
//!
//! The input is the JSON syntax tree emitted by the parser. Diagnostics go
//! to stderr; a nonzero error count halts compilation with exit code 1.

use anyhow::Context;
use clap::Parser;
use cool_compiler::ast;
use cool_compiler::symbols::{Interner, Predefined};
use cool_compiler::SemanticAnalyzer;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "coolc")]
#[command(author = "Cool Toolchain Team")]
#[command(version)]
#[command(about = "Semantic analyzer for the Cool language", long_about = None)]
struct Args {
    /// Parsed program (JSON syntax tree from the parser)
    #[arg(required = true)]
    input: PathBuf,

    /// Dump the loaded AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let mut interner = Interner::new();
    let names = Predefined::new(&mut interner);

    let program = ast::load::program_from_json(&source, &mut interner)
        .with_context(|| format!("loading {}", args.input.display()))?;

    if args.dump_ast {
        eprintln!("=== AST ===");
        eprintln!("{program:#?}");
        eprintln!("=== End AST ===\n");
    }

    if args.verbose {
        eprintln!("Analyzing {} class(es)...", program.classes.len());
    }

    let mut analyzer = SemanticAnalyzer::new(&interner, &names);
    if analyzer.check(&program).is_err() {
        eprintln!("Compilation halted due to static semantic errors.");
        process::exit(1);
    }

    if args.verbose {
        eprintln!("Class hierarchy is well-formed; no cycles detected.");
    }

    Ok(())
}
