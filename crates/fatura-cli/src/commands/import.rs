//! Import command - extract, validate, and store bill files.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use fatura_core::{EnergyBillParser, InvoiceRecord};

use crate::store::{InvoiceStore, JsonFileStore};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Data file holding imported bills (overrides configuration)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of importing a single file.
struct ImportOutcome {
    path: PathBuf,
    record: Option<InvoiceRecord>,
    error: Option<String>,
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let data_file = args
        .data_file
        .clone()
        .unwrap_or_else(|| config.storage.data_file.clone());
    let mut store = JsonFileStore::open(&data_file)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to import",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = EnergyBillParser::new();
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        match import_single_file(&path, &parser, &mut store) {
            Ok(record) => {
                outcomes.push(ImportOutcome {
                    path,
                    record: Some(record),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to import {}: {}", path.display(), error_msg);
                    outcomes.push(ImportOutcome {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to import {}: {}", path.display(), error_msg);
                    anyhow::bail!("Import failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let imported: Vec<_> = outcomes.iter().filter(|o| o.record.is_some()).collect();
    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    println!();
    println!(
        "{} Imported {} bills into {} in {:?}",
        style("✓").green(),
        imported.len(),
        data_file.display(),
        start.elapsed()
    );

    for outcome in &imported {
        if let Some(record) = &outcome.record {
            println!(
                "   {} {}/{}",
                style("+").green(),
                record.client_number,
                record.reference_month
            );
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn import_single_file(
    path: &PathBuf,
    parser: &EnergyBillParser,
    store: &mut dyn InvoiceStore,
) -> anyhow::Result<InvoiceRecord> {
    let text = super::extract::read_bill_text(path)?;
    let fields = parser.parse(&text);

    let Some(record) = InvoiceRecord::from_parsed(&fields, Utc::now()) else {
        anyhow::bail!("missing fields: {}", fields.missing_fields().join(", "));
    };

    if store
        .find_by_key(&record.client_number, &record.reference_month)?
        .is_some()
    {
        anyhow::bail!(
            "bill {}/{} already imported",
            record.client_number,
            record.reference_month
        );
    }

    store.insert(record.clone())?;
    Ok(record)
}
