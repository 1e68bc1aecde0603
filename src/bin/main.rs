//! mdxgen CLI - Compile query IR documents to MDX
//!
//! Usage:
//!   mdxgen compile <query.json> --metadata <fields.json> [--cube <name>] [--date-placement <policy>]
//!   mdxgen describe <fields.json>
//!
//! Examples:
//!   mdxgen compile query.json --metadata fields.json --cube Sales
//!   mdxgen compile query.json --metadata fields.json --date-placement resolver --output verbose
//!   mdxgen describe fields.json

use clap::{Parser, Subcommand, ValueEnum};
use mdxgen::compile::{compile, CompileOptions};
use mdxgen::config::Settings;
use mdxgen::ir::QueryIr;
use mdxgen::metadata::MetadataIndex;
use mdxgen::planner::DatePlacement;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdxgen")]
#[command(about = "mdxgen - Compile structured query IR to MDX")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query IR document to MDX
    Compile {
        /// Path to the query IR JSON document
        query: PathBuf,

        /// Path to the field metadata JSON document
        #[arg(short, long)]
        metadata: PathBuf,

        /// Cube named in the FROM clause (overrides the config file)
        #[arg(short, long)]
        cube: Option<String>,

        /// Where date fragments go (overrides the config file)
        #[arg(short, long)]
        date_placement: Option<DatePlacementArg>,

        /// Output format
        #[arg(short, long, default_value = "mdx")]
        output: OutputFormat,
    },

    /// Print the cube outline of a field metadata document
    Describe {
        /// Path to the field metadata JSON document
        file: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum DatePlacementArg {
    Rows,
    Resolver,
}

impl From<DatePlacementArg> for DatePlacement {
    fn from(arg: DatePlacementArg) -> Self {
        match arg {
            DatePlacementArg::Rows => DatePlacement::Rows,
            DatePlacementArg::Resolver => DatePlacement::Resolver,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Output MDX only
    Mdx,
    /// Output MDX with comments
    Verbose,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile {
            query,
            metadata,
            cube,
            date_placement,
            output,
        } => cmd_compile(&settings, query, metadata, cube, date_placement, output),
        Commands::Describe { file } => cmd_describe(file),
    }
}

fn cmd_compile(
    settings: &Settings,
    query: PathBuf,
    metadata: PathBuf,
    cube: Option<String>,
    date_placement: Option<DatePlacementArg>,
    output: OutputFormat,
) -> ExitCode {
    let index = match MetadataIndex::from_file(&metadata) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error loading metadata '{}': {}", metadata.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let ir = match QueryIr::from_file(&query) {
        Ok(ir) => ir,
        Err(e) => {
            eprintln!("Error loading query '{}': {}", query.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = CompileOptions::from_settings(&settings.compiler);
    if let Some(cube) = &cube {
        options = options.with_cube(cube);
    }
    if let Some(placement) = date_placement {
        options = options.with_date_placement(placement.into());
    }

    match compile(&index, &ir, &options) {
        Ok(compiled) => {
            match output {
                OutputFormat::Mdx => {
                    println!("{}", compiled.mdx);
                }
                OutputFormat::Verbose => {
                    println!("-- mdxgen Compiled MDX");
                    println!("-- Source: {}", query.display());
                    println!("-- Cube: {}", options.cube);
                    println!("-- Date placement: {:?}", options.date_placement);
                    if let Some(placement) = compiled.date_placement {
                        println!("-- Date fragment: {:?}", placement);
                    }
                    match &compiled.order_by {
                        Some(order_by) => {
                            println!("-- Order by: {} {:?}", order_by.column, order_by.dir)
                        }
                        None => println!("-- Order by: none ({:?})", compiled.ordering),
                    }
                    println!();
                    println!("{}", compiled.mdx);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_describe(file: PathBuf) -> ExitCode {
    let index = match MetadataIndex::from_file(&file) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error loading metadata '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("File: {}", file.display());
    println!();
    print!("{}", index.outline());

    ExitCode::SUCCESS
}
