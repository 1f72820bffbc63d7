// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-resolve CLI
//!
//! Command-line interface for classifying and resolving browser queries.

use clap::{Parser, Subcommand};
use ferro_resolve::cli::{
    output_candidates, output_classification, output_error, output_route, process_input_line,
    OutputFormat,
};
use ferro_resolve::config::ResolverConfig;
use ferro_resolve::dataset::{DatasetContext, ReferenceGenome};
use ferro_resolve::lookup::MockLookup;
use ferro_resolve::resolve::{classify, Resolver};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ferro-resolve")]
#[command(author, version, about = "Resolve genomic browser queries to navigation targets")]
#[command(long_about = "Classify free-text queries and resolve them to browser pages.

Examples:
  ferro-resolve search '1-55516888-G-GA'
  ferro-resolve search PCSK9 --dataset gnomad_r2_1
  ferro-resolve search -i queries.txt -f json
  ferro-resolve navigate rs6025
  ferro-resolve classify 'chr1:55039447'")]
struct Cli {
    /// Configuration file (defaults to .ferro-resolve.toml, then ~/.config/ferro/resolve.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve queries the way the search box does
    Search {
        /// Query text (reads from -i or stdin when omitted)
        query: Option<String>,

        /// Input file with one query per line
        #[arg(short, long, conflicts_with = "query")]
        input: Option<PathBuf>,

        /// Dataset id
        #[arg(short, long)]
        dataset: Option<String>,

        /// Reference genome for remote search (GRCh37/hg19, GRCh38/hg38);
        /// defaults to the dataset's build
        #[arg(long)]
        genome: Option<String>,

        /// Skip remote lookups; gene symbols report no match
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Resolve a URL path segment the way direct navigation does
    Navigate {
        /// Path segment, e.g. a variant id or rsID
        segment: String,

        /// Dataset id
        #[arg(short, long)]
        dataset: Option<String>,

        /// Reference genome override (GRCh37/hg19, GRCh38/hg38)
        #[arg(long)]
        genome: Option<String>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show which identifier kind a query is classified as
    Classify {
        /// Query text
        query: String,

        /// Dataset id
        #[arg(short, long)]
        dataset: Option<String>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Generate a sample configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = ".ferro-resolve.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Search {
            query,
            input,
            dataset,
            genome,
            offline,
            format,
        } => {
            let ctx = dataset_context(dataset, genome.as_deref(), &config)?;
            let format: OutputFormat = format.parse()?;
            let resolver = if offline {
                Resolver::with_lookup(Arc::new(MockLookup::new()))
                    .with_window_radius(config.resolver.window_radius)
            } else {
                Resolver::from_config(&config)?
            };
            search_command(&resolver, query, input.as_deref(), &ctx, format).await
        }
        Commands::Navigate {
            segment,
            dataset,
            genome,
            format,
        } => {
            let ctx = dataset_context(dataset, genome.as_deref(), &config)?;
            let format: OutputFormat = format.parse()?;
            let resolver = Resolver::from_config(&config)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            match resolver.navigate(&segment, &ctx).await {
                Ok(route) => output_route(&mut out, &segment, &route, format)?,
                Err(e) => {
                    output_error(&mut out, &segment, &e, format)?;
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Classify {
            query,
            dataset,
            format,
        } => {
            let ctx = dataset_context(dataset, None, &config)?;
            let format: OutputFormat = format.parse()?;
            let identifier = classify(&query, &ctx);
            output_classification(&mut io::stdout().lock(), &query, identifier.as_ref(), format)?;
            Ok(())
        }
        Commands::Config { output, force } => config_command(&output, force),
    }
}

async fn search_command(
    resolver: &Resolver,
    query: Option<String>,
    input: Option<&Path>,
    ctx: &DatasetContext,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let queries: Vec<String> = match (query, input) {
        (Some(query), _) => vec![query],
        (None, Some(path)) => read_queries(BufReader::new(File::open(path)?))?,
        (None, None) => read_queries(io::stdin().lock())?,
    };
    info!(count = queries.len(), dataset = %ctx, "resolving queries");

    let mut out = BufWriter::new(io::stdout().lock());
    let mut failures = 0usize;
    for query in &queries {
        match resolver.search(query, ctx).await {
            Ok(candidates) => output_candidates(&mut out, query, &candidates, format)?,
            Err(e) => {
                failures += 1;
                output_error(&mut out, query, &e, format)?;
            }
        }
    }
    out.flush()?;

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn read_queries<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut queries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(query) = process_input_line(&line, i == 0) {
            queries.push(query.to_string());
        }
    }
    Ok(queries)
}

fn config_command(output_path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output_path.exists() && !force {
        eprintln!(
            "Configuration file already exists: {} (use --force to overwrite)",
            output_path.display()
        );
        std::process::exit(1);
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    ResolverConfig::default().to_file(output_path)?;
    println!(
        "Sample configuration file created: {}",
        output_path.display()
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ResolverConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ResolverConfig::load_from_path(path)?,
        None => ResolverConfig::load().unwrap_or_default(),
    };
    config.validate()?;
    Ok(config)
}

fn dataset_context(
    dataset: Option<String>,
    genome: Option<&str>,
    config: &ResolverConfig,
) -> Result<DatasetContext, Box<dyn std::error::Error>> {
    let ctx = DatasetContext::new(dataset.unwrap_or_else(|| config.resolver.default_dataset.clone()));
    match genome {
        Some(name) => {
            let genome = ReferenceGenome::parse(name)
                .ok_or_else(|| format!("Unknown reference genome '{}'", name))?;
            Ok(ctx.with_reference_genome(genome))
        }
        None => Ok(ctx),
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}
