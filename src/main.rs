//! Organ MIDI bindings - command line tool
//!
//! Prints, exports or interactively regroups the MIDI bindings of an organ description.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use organ_midi_bindings::cli::{render_tree, run_shell, Shell};
use organ_midi_bindings::config::{DescriptionWatcher, OrganConfig};
use organ_midi_bindings::export;
use organ_midi_bindings::tree::{Forest, GroupBy};

/// Table format for --export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Organ MIDI bindings - inspect the canonical MIDI events of an organ console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the organ description
    #[arg(short, long, default_value = "organ.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Grouping, overriding the description's view setting
    #[arg(short, long, value_enum)]
    group_by: Option<GroupBy>,

    /// Show the events under each object
    #[arg(long)]
    expand: bool,

    /// Write the expanded tree as a table to PATH ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    export: Option<String>,

    /// Table format for --export
    #[arg(long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Reprint the tree whenever the description changes
    #[arg(long)]
    watch: bool,

    /// Start the interactive shell
    #[arg(long)]
    shell: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.log_json)?;

    info!("Organ description: {}", args.config);

    if args.watch {
        return run_watch(&args).await;
    }

    let config = OrganConfig::load(&args.config).await?;
    let group_by = args.group_by.unwrap_or(config.view.group_by);

    if let Some(path) = &args.export {
        let collection = config.build_collection();
        let mut forest = Forest::build(&collection, group_by);
        let rows = export::rows(&mut forest);
        write_export(&rows, path, args.format)?;
        info!("Exported {} rows to {}", rows.len(), path);
        return Ok(());
    }

    if args.shell {
        let shell = Shell::new(config.build_collection(), group_by, args.expand);
        // rustyline blocks on stdin
        return tokio::task::spawn_blocking(move || run_shell(shell)).await?;
    }

    print_tree(&config, group_by, args.expand)
}

fn print_tree(config: &OrganConfig, group_by: GroupBy, expand: bool) -> Result<()> {
    let collection = config.build_collection();
    let title = if config.name.is_empty() { "Organ" } else { config.name.as_str() };
    println!("\n{} {}", title.bold().cyan(), format!("(by {})", group_by).dimmed());

    let mut forest = Forest::build(&collection, group_by);
    let mut stdout = io::stdout().lock();
    render_tree(&mut forest, expand, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn write_export(rows: &[export::Row], path: &str, format: ExportFormat) -> Result<()> {
    let writer: Box<dyn Write> = if path == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
        Box::new(BufWriter::new(file))
    };

    match format {
        ExportFormat::Csv => export::write_csv(rows, writer)?,
        ExportFormat::Json => export::write_json(rows, writer)?,
    }
    Ok(())
}

async fn run_watch(args: &Args) -> Result<()> {
    let (mut watcher, initial) = DescriptionWatcher::new(args.config.clone()).await?;
    info!("Organ description loaded with hot-reload enabled");

    print_tree(&initial, args.group_by.unwrap_or(initial.view.group_by), args.expand)?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(config) = watcher.next_config() => {
                info!("Organ description changed, rebuilding tree");
                let group_by = args.group_by.unwrap_or(config.view.group_by);
                if let Err(e) = print_tree(&config, group_by, args.expand) {
                    warn!("Failed to print tree: {}", e);
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so exports to stdout stay clean
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_writer(io::stderr),
            )
            .init();
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}
