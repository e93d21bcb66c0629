//! List command - show stored bills with display-ready month names.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use fatura_core::{InvoiceRecord, format_reference_month};

use crate::store::{InvoiceStore, JsonFileStore};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
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
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

/// A stored bill augmented with its display month and year.
#[derive(Serialize)]
struct FormattedInvoice {
    #[serde(flatten)]
    record: InvoiceRecord,
    month: String,
    year: String,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let data_file = args
        .data_file
        .clone()
        .unwrap_or_else(|| config.storage.data_file.clone());
    let store = JsonFileStore::open(&data_file)?;

    let invoices: Vec<FormattedInvoice> = store
        .find_all()?
        .into_iter()
        .map(|record| {
            let display = format_reference_month(&record.reference_month);
            FormattedInvoice {
                record,
                month: display.name,
                year: display.year,
            }
        })
        .collect();

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&invoices)?,
        OutputFormat::Csv => format_csv(&invoices)?,
        OutputFormat::Text => format_text(&invoices),
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

fn format_csv(invoices: &[FormattedInvoice]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "client_number",
        "reference_month",
        "month",
        "year",
        "electric_energy_kwh",
        "electric_energy_r",
        "energy_scee_kwh",
        "energy_scee_r",
        "energy_compensation_kwh",
        "energy_compensation_r",
        "public_lighting_r",
        "total_r",
        "created_at",
    ])?;

    for invoice in invoices {
        let record = &invoice.record;
        wtr.write_record([
            record.client_number.clone(),
            record.reference_month.clone(),
            invoice.month.clone(),
            invoice.year.clone(),
            record.electric_energy_kwh.to_string(),
            record.electric_energy_r.to_string(),
            record.energy_scee_kwh.to_string(),
            record.energy_scee_r.to_string(),
            record.energy_compensation_kwh.to_string(),
            record.energy_compensation_r.to_string(),
            record.public_lighting_r.to_string(),
            record.total_r.to_string(),
            record.created_at.to_rfc3339(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoices: &[FormattedInvoice]) -> String {
    if invoices.is_empty() {
        return "No bills stored.\n".to_string();
    }

    let mut output = String::new();

    for invoice in invoices {
        let record = &invoice.record;
        output.push_str(&format!(
            "{} - {} {} ({})\n",
            record.client_number, invoice.month, invoice.year, record.reference_month
        ));
        output.push_str(&format!(
            "  consumo: {} kWh + {} kWh SCEE, compensado: {} kWh\n",
            record.electric_energy_kwh, record.energy_scee_kwh, record.energy_compensation_kwh
        ));
        output.push_str(&format!("  total: R$ {}\n", record.total_r));
    }

    output
}
