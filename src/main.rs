/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     main.rs
 * Purpose:  Command-line entry point: runs CISP source files.
 *
 * Author:   Sam Wilcox
 * Github:   https://github.com/samwilcox/cisp
 *
 * License:
 * This file is part of the CISP language project.
 *
 * CISP is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use cisp::{lexer, parser, CispError, DiagnosticPrinter, Interpreter};
use serde::Serialize;

/// Why one file failed.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Cisp(#[from] CispError),

    #[error("cannot write --emit output: {0}")]
    Emit(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Reports the failure on stderr: CISP errors as full diagnostics
    /// against `source`, anything else as a one-line message.
    fn report(&self, path: &Path, source: &str) {
        match self {
            CliError::Cisp(err) => {
                DiagnosticPrinter::new(path.display().to_string(), source).print(err)
            }
            CliError::Emit(_) | CliError::Output(_) => {
                eprintln!("error: {}: {}", path.display(), self)
            }
        }
    }
}

/// What `--emit` prints instead of running the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The token stream, as JSON
    Tokens,
    /// The parsed syntax tree, as JSON
    Ast,
}

/// CISP - Cascading Rules, Evaluated!
#[derive(Parser)]
#[command(name = "cisp", version, about = "Run CISP rule files")]
struct Cli {
    /// Source files, executed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print tokens or the AST as JSON instead of executing
    #[arg(long, value_enum)]
    emit: Option<Emit>,

    /// Suppress the banner and the result summary
    #[arg(long)]
    quiet: bool,
}

/// Installs a stderr subscriber, only when RUST_LOG is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut unreadable = false;

    for path in &cli.files {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("error: cannot read {}: {}", path.display(), err);
                unreadable = true;
                continue;
            }
        };

        let outcome = match cli.emit {
            Some(emit) => emit_json(emit, &source),
            None => execute(path, &source, cli.quiet),
        };

        if let Err(err) = outcome {
            err.report(path, &source);
            process::exit(1);
        }
    }

    if unreadable {
        process::exit(1);
    }
}

/// Runs one file's `main`, writing program output to stdout.
fn execute(path: &Path, source: &str, quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!(">> Executing: {}", path.display());
        println!("-------------------------");
    }

    let program = parser::parse(source)?;

    let started = Instant::now();
    let result = Interpreter::new(io::stdout().lock()).run(&program)?;
    let elapsed = started.elapsed();

    tracing::debug!(file = %path.display(), ?elapsed, "program finished");

    if !quiet {
        println!("-------------------------");
        println!("main returned {} in {:?}", result, elapsed);
    }

    Ok(())
}

fn emit_json(emit: Emit, source: &str) -> Result<(), CliError> {
    let mut out = io::stdout().lock();

    match emit {
        Emit::Tokens => write_json(&lexer::tokenize(source)?, &mut out),
        Emit::Ast => write_json(&parser::parse(source)?, &mut out),
    }
}

/// Pretty-prints `value` as JSON followed by a newline.
fn write_json<T: Serialize>(value: &T, out: &mut impl Write) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_goes_to_the_writer() {
        let mut out = Vec::new();
        write_json(&vec!["a", "b"], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[\n  \"a\",\n  \"b\"\n]\n");
    }

    #[test]
    fn serialization_failures_are_returned() {
        // JSON object keys must be strings.
        let value = BTreeMap::from([((1, 2), "pair")]);

        let err = write_json(&value, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Emit(_)));
        assert!(err.to_string().starts_with("cannot write --emit output"));
    }
}
