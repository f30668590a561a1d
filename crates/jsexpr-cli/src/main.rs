//! `jsexpr` CLI: parse literal values and resolve `new` chains from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse a literal and print it as pretty JSON (stdin → stdout)
//! echo '{a: 1, list: [true, undefined,]}' | jsexpr literal
//!
//! # Normalize a literal back to compact JS source
//! jsexpr literal --format source -i data.js
//!
//! # Resolve a `new` chain to its canonical form
//! echo 'new new Foo(x)(x)' | jsexpr resolve
//!
//! # Check an annotated fixture (`expr // NEW(...)` lines)
//! jsexpr check -i new_chains.txt
//!
//! # Debug logging to stderr
//! jsexpr -v resolve -i expr.js
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsexpr_core::options::DEFAULT_MAX_DEPTH;
use jsexpr_core::{CaseOutcome, ParseOptions};
use std::io::{self, Read};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "jsexpr",
    version,
    about = "Parse JavaScript literal values and resolve `new` expressions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum container and `new` nesting depth
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log parser activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one literal value
    Literal {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = LiteralFormat::Json)]
        format: LiteralFormat,
    },
    /// Resolve one expression containing `new` chains
    Resolve {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = ResolveFormat::Canonical)]
        format: ResolveFormat,
    },
    /// Check every `expr // EXPECTED` line of an annotated fixture
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LiteralFormat {
    /// Pretty-printed JSON (`undefined` becomes `null`)
    Json,
    /// Compact JavaScript literal source
    Source,
    /// Indented JavaScript literal source
    Pretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResolveFormat {
    /// `NEW(...)` / `CALL(...)` / `MEMBER(...)` annotation form
    Canonical,
    /// The resolved tree as pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let options = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Literal {
            input,
            output,
            format,
        } => {
            let source = read_input(input.as_deref())?;
            let value =
                jsexpr_core::parse_value_with(&source, &options).context("Failed to parse literal")?;
            let rendered = match format {
                LiteralFormat::Json => serde_json::to_string_pretty(&value.to_json())?,
                LiteralFormat::Source => jsexpr_core::to_source(&value),
                LiteralFormat::Pretty => jsexpr_core::to_source_pretty(&value, 2),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Resolve {
            input,
            output,
            format,
        } => {
            let source = read_input(input.as_deref())?;
            let expr = jsexpr_core::parse_expression_with(&source, &options)
                .context("Failed to resolve expression")?;
            let rendered = match format {
                ResolveFormat::Canonical => jsexpr_core::render(&expr),
                ResolveFormat::Json => serde_json::to_string_pretty(&expr)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            let report = jsexpr_core::check_fixture(&text, &options);
            for (case, outcome) in &report.results {
                match outcome {
                    CaseOutcome::Pass => println!("ok    line {}: {}", case.line, case.source),
                    CaseOutcome::Mismatch { actual } => {
                        println!("FAIL  line {}: {}", case.line, case.source);
                        println!("        expected: {}", case.expected);
                        println!("        actual:   {}", actual);
                    }
                    CaseOutcome::Error(err) => {
                        println!("ERROR line {}: {}", case.line, case.source);
                        println!("        {}", err);
                    }
                }
            }
            println!("{} passed, {} failed", report.passed(), report.failed());
            if !report.is_success() {
                bail!("{} of {} cases failed", report.failed(), report.results.len());
            }
        }
    }

    Ok(())
}

/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to
/// `warn`. Logs go to stderr.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
