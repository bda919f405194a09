// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use concord::{
    crawl, query_terms, Config, CrawlConfig, PartitionReader, PartitionWriter, QueryError,
    QueryProcessor, QueryResult,
};

mod cli;
use cli::display::{
    human_bytes, result_lines, result_summary, section, table_row, Column, Painter, Tone,
};
use cli::{Cli, Commands, CrawlArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Index {
            input,
            output,
            config,
            crawl,
        } => run_index(&input, &output, config.as_deref(), &crawl),
        Commands::Inspect { file, words } => cli::inspect::run(&file, words),
        Commands::Search {
            partitions,
            validate,
            config,
            batch,
            json,
            terms,
        } => run_search(partitions, validate, config.as_deref(), batch.as_deref(), json, &terms),
        Commands::Shell { dir, config, crawl } => run_shell(&dir, config.as_deref(), &crawl),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn crawl_config(path: Option<&Path>, args: &CrawlArgs) -> Result<CrawlConfig> {
    let mut config = load_config(path)?.crawl;
    args.apply(&mut config);
    Ok(config)
}

// ============================================================================
// INDEX
// ============================================================================

fn run_index(input: &Path, output: &Path, config: Option<&Path>, args: &CrawlArgs) -> Result<()> {
    let config = crawl_config(config, args)?;
    let corpus = crawl(input, &config).with_context(|| format!("indexing {}", input.display()))?;

    let written = PartitionWriter::new(output)
        .write(&corpus)
        .with_context(|| format!("writing {}", output.display()))?;

    eprintln!("✅ Index complete");
    eprintln!(
        "   {} documents │ {} words │ {} → {}",
        corpus.docs().len(),
        corpus.index().num_words(),
        human_bytes(written as u64),
        output.display()
    );
    Ok(())
}

// ============================================================================
// SEARCH
// ============================================================================

#[derive(Serialize)]
struct BatchEntry<'a> {
    query: &'a str,
    results: Vec<QueryResult>,
}

fn run_search(
    partitions: Vec<PathBuf>,
    validate: bool,
    config: Option<&Path>,
    batch: Option<&Path>,
    json: bool,
    terms: &[String],
) -> Result<()> {
    let config = load_config(config)?.search;
    let partitions = if partitions.is_empty() {
        config.partitions
    } else {
        partitions
    };
    if partitions.is_empty() {
        bail!("no partitions given: pass -p <file> or set search.partitions in the config");
    }
    let validate = validate || config.validate;

    let processor = QueryProcessor::<PartitionReader>::open(&partitions, validate)
        .context("opening partitions")?;

    match batch {
        Some(path) => run_batch(&processor, path, json),
        None => {
            let query = query_terms(&terms.join(" "));
            let results = processor.process_query(&query).map_err(|err| match err {
                QueryError::EmptyQuery => anyhow::anyhow!("empty query: give at least one word"),
                other => other.into(),
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let painter = Painter::stdout();
                print_partitions(&painter, &partitions, &processor);
                println!();
                println!("{}", section(&painter, "RESULTS"));
                print_results(&painter, &results);
                println!();
                println!("{}", result_summary(results.len(), processor.num_partitions()));
            }
            Ok(())
        }
    }
}

fn run_batch(processor: &QueryProcessor<PartitionReader>, path: &Path, json: bool) -> Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let queries: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let resolve = |line: &&str| processor.process_query(&query_terms(line));

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Vec<QueryResult>, QueryError>> = {
        use rayon::prelude::*;
        queries.par_iter().map(resolve).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Vec<QueryResult>, QueryError>> = queries.iter().map(resolve).collect();

    let mut entries = Vec::with_capacity(queries.len());
    for (query, outcome) in queries.iter().zip(outcomes) {
        let results = match outcome {
            Ok(results) => results,
            // A line of punctuation has no words; report it as unmatched.
            Err(QueryError::EmptyQuery) => Vec::new(),
            Err(err) => return Err(err).with_context(|| format!("query '{}'", query)),
        };
        entries.push(BatchEntry { query, results });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let painter = Painter::stdout();
        for entry in &entries {
            println!("{}", section(&painter, &format!("query: {}", entry.query)));
            print_results(&painter, &entry.results);
        }
    }
    Ok(())
}

fn print_results(painter: &Painter, results: &[QueryResult]) {
    if results.is_empty() {
        println!("  {}", painter.paint(Tone::Dim, "no document contains every term"));
    }
    for line in result_lines(painter, results) {
        println!("{}", line);
    }
}

/// One row per opened partition: file, documents, words, size.
fn print_partitions(painter: &Painter, paths: &[PathBuf], processor: &QueryProcessor<PartitionReader>) {
    let layout = [
        Column::left(40).tone(Tone::Word),
        Column::right(10),
        Column::right(10),
        Column::right(10),
    ];
    println!("{}", section(painter, "PARTITIONS"));
    println!("{}", table_row(painter, &layout, &["file", "docs", "words", "size"]));
    for (path, reader) in paths.iter().zip(processor.partitions()) {
        println!(
            "{}",
            table_row(
                painter,
                &layout,
                &[
                    path.display().to_string().as_str(),
                    reader.num_docs().to_string().as_str(),
                    reader.num_words().to_string().as_str(),
                    human_bytes(reader.size() as u64).as_str(),
                ]
            )
        );
    }
}

// ============================================================================
// SHELL
// ============================================================================

fn run_shell(dir: &Path, config: Option<&Path>, args: &CrawlArgs) -> Result<()> {
    let config = crawl_config(config, args)?;

    println!("Indexing '{}'", dir.display());
    let corpus = crawl(dir, &config).context("indexing failed")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    cli::shell::run(&corpus, stdin.lock(), &mut stdout)
}
