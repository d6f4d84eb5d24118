//! Command implementations for the report processor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and result formatting for the CLI interface.

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::Result;
use crate::app::services::batch_runner::{BatchRunner, BatchStats};
use crate::app::services::message_parser::SchemaCatalog;
use crate::app::services::report_store::MemoryStore;
use crate::cli::args::{Args, Commands, OutputFormat, ProcessArgs, SchemasArgs};

/// How many failure samples the human report prints
const FAILURE_SAMPLE_LIMIT: usize = 5;

/// Main command runner for the report processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `process`: batch processing of a message log into the sink
/// - `schemas`: listing of the registered report types
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Process(process_args) => run_process(process_args).await,
        Commands::Schemas(schemas_args) => run_schemas(schemas_args),
    }
}

/// Run the process command: parse a message log and route outcomes
async fn run_process(args: ProcessArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting 1000 Days report processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = args.to_config();
    config.validate()?;

    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Parsing messages...");
        Some(pb)
    } else {
        None
    };

    let store = MemoryStore::new();
    let runner = BatchRunner::new(config);
    let stats = runner.run_with_progress(&store, progress_bar.as_ref()).await?;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Processing complete");
    }

    match args.output_format {
        OutputFormat::Human => print_human_report(&args, &stats, &store),
        OutputFormat::Json => print_json_report(&stats, &store),
    }

    Ok(())
}

/// Run the schemas command: list the registered report types
fn run_schemas(args: SchemasArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;

    let catalog = SchemaCatalog::standard();
    match args.output_format {
        OutputFormat::Human => print_human_schemas(&catalog),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&schemas_json(&catalog)).unwrap()
            );
        }
    }

    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("thousanddays_processor={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the human-readable batch report
fn print_human_report(args: &ProcessArgs, stats: &BatchStats, store: &MemoryStore) {
    println!();
    println!("{}", "Batch complete".bold());
    println!(
        "   Processed {} of {} selected entries in {} ({} pass{})",
        stats.processed,
        stats.total_entries,
        HumanDuration(stats.processing_time),
        stats.passes,
        if stats.passes == 1 { "" } else { "es" }
    );
    println!("   Valid:   {}", stats.valid.to_string().green());
    println!(
        "   Failed:  {} ({} error(s) recorded)",
        stats.failed.to_string().red(),
        stats.errors_recorded
    );
    println!("   Unknown: {}", stats.unknown.to_string().yellow());
    println!("   Success rate: {:.1}%", stats.success_rate());

    if args.dry_run {
        println!();
        println!("{}", "Dry run - nothing was stored".yellow());
    } else {
        let entities = store.entity_names();
        if !entities.is_empty() {
            println!();
            println!("{}", "Stored rows".bold());
            for entity in entities {
                println!("   {}: {}", entity, store.row_count(&entity));
            }
        }
    }

    if !stats.failures.is_empty() {
        println!();
        println!("{}", "Failure samples".bold());
        for failure in stats.failures.iter().take(FAILURE_SAMPLE_LIMIT) {
            println!("   {}", failure.red());
        }
        if stats.failures.len() > FAILURE_SAMPLE_LIMIT {
            println!("   ... and {} more", stats.failures.len() - FAILURE_SAMPLE_LIMIT);
        }
    }

    println!();
}

/// Print the JSON batch report for machine consumption
fn print_json_report(stats: &BatchStats, store: &MemoryStore) {
    let tables: serde_json::Map<String, serde_json::Value> = store
        .entity_names()
        .into_iter()
        .map(|entity| {
            let count = store.row_count(&entity);
            (entity, serde_json::json!(count))
        })
        .collect();

    let report = serde_json::json!({
        "total_entries": stats.total_entries,
        "processed": stats.processed,
        "valid": stats.valid,
        "failed": stats.failed,
        "unknown": stats.unknown,
        "errors_recorded": stats.errors_recorded,
        "passes": stats.passes,
        "success_rate": stats.success_rate(),
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "tables": tables,
        "failures": stats.failures,
    });

    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}

/// Print the human-readable schema listing
fn print_human_schemas(catalog: &SchemaCatalog) {
    println!();
    println!("{}", "Registered report types".bold());
    for schema in catalog.schemas() {
        println!();
        println!("{}  ({})", schema.code().bold(), schema.report_name());
        for spec in schema.fields() {
            let kind = spec.kind();
            let marker = if spec.is_repeatable() { "*" } else { "" };
            match kind.expectations() {
                Some(expected) => {
                    let codes: Vec<&str> = expected.iter().copied().collect();
                    println!("   {}{}  [{}]", kind.name(), marker, codes.join(" "));
                }
                None => println!("   {}{}", kind.name(), marker),
            }
        }
    }
    println!();
}

/// Build the JSON schema listing
fn schemas_json(catalog: &SchemaCatalog) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = catalog
        .schemas()
        .map(|schema| {
            let fields: Vec<serde_json::Value> = schema
                .fields()
                .iter()
                .map(|spec| {
                    let kind = spec.kind();
                    serde_json::json!({
                        "kind": kind.name(),
                        "repeatable": spec.is_repeatable(),
                        "expectations": kind
                            .expectations()
                            .map(|set| set.iter().copied().collect::<Vec<_>>()),
                    })
                })
                .collect();

            serde_json::json!({
                "code": schema.code(),
                "report": schema.report_name(),
                "fields": fields,
            })
        })
        .collect();

    serde_json::json!({ "report_types": schemas })
}
