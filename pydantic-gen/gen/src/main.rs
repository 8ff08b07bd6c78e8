//! Pydantic Model Generator
//!
//! Generates pydantic model classes from YAML schema definitions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use pydantic_gen::{
    FormatterKind, GeneratorError, GeneratorOptions, ModelGenerator, PythonRuntime,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Pydantic model generator - transforms YAML schemas into Python models
#[derive(Parser, Debug)]
#[command(name = "pydantic-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema file to generate models for
    schema: PathBuf,

    /// Write the generated module here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with generator options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Formatter to run over the generated code (overrides the config file)
    #[arg(long, value_enum)]
    formatter: Option<FormatterArg>,

    /// Directory searched when the schema path does not exist
    #[arg(long)]
    fallback_dir: Option<PathBuf>,

    /// Import the generated code as this module to check that it executes
    #[arg(long, value_name = "MODULE")]
    load: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatterArg {
    Builtin,
    Black,
    Ruff,
}

impl From<FormatterArg> for FormatterKind {
    fn from(arg: FormatterArg) -> Self {
        match arg {
            FormatterArg::Builtin => FormatterKind::Builtin,
            FormatterArg::Black => FormatterKind::Black,
            FormatterArg::Ruff => FormatterKind::Ruff,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GeneratorError> {
    let mut options = match &cli.config {
        Some(path) => GeneratorOptions::from_toml_file(path)?,
        None => GeneratorOptions::default(),
    };
    if let Some(formatter) = cli.formatter {
        options = options.with_formatter(formatter.into());
    }
    if let Some(dir) = cli.fallback_dir {
        options = options.with_fallback_dir(dir);
    }

    let generator = ModelGenerator::new(options)?;
    let module = generator.generate_from_path(&cli.schema)?;

    if let Some(name) = &cli.load {
        let runtime = PythonRuntime::from_options(generator.options())?;
        let loaded = module.load(&runtime, name)?;
        eprintln!(
            "{} Imported generated code as module '{}' with {}",
            "✓".green(),
            loaded.name(),
            runtime.interpreter().display()
        );
    }

    match &cli.output {
        Some(path) => {
            let written = module.to_file(path)?;
            eprintln!("{} Wrote {}", "✓".green(), written.display());
        }
        None => print!("{module}"),
    }

    Ok(())
}

/// Installs a stderr subscriber filtered by `RUST_LOG` or the `-v` count.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,pydantic_gen=info,pydantic_gen_define=info".to_string(),
            2 => "info,pydantic_gen=debug,pydantic_gen_define=debug".to_string(),
            _ => "debug,pydantic_gen=trace,pydantic_gen_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
