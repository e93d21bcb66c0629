//! Extract command - pull billing fields out of a single bill file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use fatura_core::{EnergyBillParser, ParsedInvoiceFields, PdfExtractor, PdfProcessor};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report fields that could not be extracted
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_bill_text(&args.input)?;
    if text.trim().len() < config.pdf.min_text_length {
        warn!(
            "extracted only {} characters of text, fields will likely be missing",
            text.trim().len()
        );
    }

    let fields = EnergyBillParser::new().parse(&text);

    if args.validate {
        let missing = fields.missing_fields();
        if missing.is_empty() {
            println!("{} All fields extracted", style("✓").green());
        } else {
            eprintln!("{}", style("Missing fields:").yellow());
            for field in &missing {
                eprintln!("  - {}", field);
            }
        }
    }

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&fields)?,
        OutputFormat::Text => format_text(&fields),
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

/// Read the text of a bill file: PDFs go through the extractor, `.txt`
/// dumps are read as-is.
pub(crate) fn read_bill_text(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());
            Ok(extractor.extract_text()?)
        }
        "txt" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn format_text(fields: &ParsedInvoiceFields) -> String {
    fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    let mut output = String::new();

    output.push_str(&format!("Cliente:           {}\n", opt(&fields.client_number)));
    output.push_str(&format!("Mês de referência: {}\n", opt(&fields.reference_month)));

    for (label, reading) in [
        ("Energia elétrica", &fields.electric_energy),
        ("Energia SCEE", &fields.energy_scee_icms),
        ("Energia compensada", &fields.energy_compensated),
    ] {
        match reading {
            Some(r) => output.push_str(&format!(
                "{:<18} {} kWh  R$ {}\n",
                format!("{}:", label),
                r.quantity,
                r.value
            )),
            None => output.push_str(&format!("{:<18} -\n", format!("{}:", label))),
        }
    }

    output.push_str(&format!(
        "Iluminação púb.:   R$ {}\n",
        opt(&fields.public_lighting)
    ));
    output.push_str(&format!(
        "Valor a pagar:     R$ {}\n",
        opt(&fields.payment_value)
    ));

    output
}
