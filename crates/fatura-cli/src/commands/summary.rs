//! Summary command - aggregate stored bills into totals.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use fatura_core::{AggregateSummary, aggregate};

use crate::store::{InvoiceStore, JsonFileStore};

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Data file holding imported bills (overrides configuration)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: SummaryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let data_file = args
        .data_file
        .clone()
        .unwrap_or_else(|| config.storage.data_file.clone());
    let store = JsonFileStore::open(&data_file)?;

    let records = store.find_all()?;
    let summary = aggregate(&records);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        OutputFormat::Text => format_text(&summary, records.len()),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(summary: &AggregateSummary, record_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bills:              {}\n", record_count));
    output.push_str(&format!(
        "Energia consumida:  {} kWh\n",
        summary.energy_consumption
    ));
    output.push_str(&format!(
        "Energia compensada: {} kWh\n",
        summary.compensated_energy
    ));
    output.push_str(&format!(
        "Total sem GD:       R$ {}\n",
        summary.total_without_gd
    ));
    output.push_str(&format!("Economia GD:        R$ {}\n", summary.gd_economy));
    output.push_str(&format!("Valor total:        R$ {}\n", summary.total_value));

    output
}
