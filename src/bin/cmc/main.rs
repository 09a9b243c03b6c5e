//! # cmc
//!
//! This binary is the driver of the C-minus front-end. It scans, parses and
//! translates a single source file and writes the report files next to it.

mod cli;

use cli::*;

use std::{error::Error, fs};

use log::info;

use cminus::compiler::Compiler;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level(args.verbosity.clone().into()).unwrap();

    let source = fs::read_to_string(&args.file)?;

    let compiler = Compiler::compile(&source);

    if args.dump_tokens {
        println!("{}", serde_json::to_string_pretty(compiler.tokens())?);
    }

    if args.dump_code {
        println!("{}", serde_json::to_string_pretty(compiler.instructions())?);
    }

    compiler.write_artifacts(&args.out_dir)?;

    info!(
        "compiled '{}', reports written to '{}'",
        args.file.display(),
        args.out_dir.display()
    );

    Ok(())
}
