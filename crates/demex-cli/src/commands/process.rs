//! Process command - extract a device order from a single note file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use demex_core::{ExtractError, NoteExtraction, OrderPipeline, SpecValue, unwrap_note_text};

use crate::api::OrderApiClient;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input note file (.txt, or .json with a wrapped note body)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the assisted path even when an LLM endpoint is configured
    #[arg(long)]
    rules_only: bool,

    /// Submit the extracted order to the configured ordering API
    #[arg(long)]
    submit: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON order payload
    Json,
    /// CSV row
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.rules_only {
        config.llm.endpoint = None;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing note: {}", args.input.display());

    let payload = fs::read_to_string(&args.input)?;
    let raw_text = unwrap_note_text(&payload);
    debug!(len = raw_text.len(), "unwrapped note text");

    let pipeline = OrderPipeline::from_config(&config);
    let extraction = match pipeline.extract(&raw_text).await {
        Ok(extraction) => extraction,
        Err(ExtractError::Validation(issues)) => {
            eprintln!("{}", style("Validation failed:").yellow());
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            anyhow::bail!("note rejected by validation");
        }
        Err(e) => return Err(e.into()),
    };

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    if args.submit {
        let client = OrderApiClient::from_config(&config.api)?;
        client.submit(&extraction.order).await?;
        println!(
            "{} Order submitted for patient {}",
            style("✓").green(),
            extraction.order.patient_id
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_extraction(
    extraction: &NoteExtraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&extraction.order)?),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &NoteExtraction) -> anyhow::Result<String> {
    let order = &extraction.order;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "device",
        "patient_name",
        "dob",
        "diagnosis",
        "ordering_provider",
        "patient_id",
        "specifications",
    ])?;

    let specifications = order
        .specifications
        .iter()
        .map(|(key, value)| format!("{key}={}", spec_display(value)))
        .collect::<Vec<_>>()
        .join("; ");

    wtr.write_record([
        order.device.as_str(),
        order.patient_name.as_str(),
        order.dob.as_str(),
        order.diagnosis.as_str(),
        order.ordering_provider.as_str(),
        order.patient_id.as_str(),
        specifications.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(extraction: &NoteExtraction) -> String {
    let note = &extraction.note;
    let order = &extraction.order;
    let mut output = String::new();

    output.push_str(&format!("Device: {}\n", order.device));
    output.push_str(&format!("Ordered by: {}\n", order.ordering_provider));
    output.push('\n');

    output.push_str("Patient:\n");
    output.push_str(&format!("  {}\n", order.patient_name));
    output.push_str(&format!("  DOB: {}\n", order.dob));
    output.push_str(&format!("  Diagnosis: {}\n", order.diagnosis));
    output.push_str(&format!("  ID: {}\n", order.patient_id));

    if !order.specifications.is_empty() {
        output.push('\n');
        output.push_str("Specifications:\n");
        for (key, value) in order.specifications.iter() {
            output.push_str(&format!("  {key}: {}\n", spec_display(value)));
        }
    }

    if !note.usage_note.is_empty() {
        output.push_str(&format!("\nUsage: {}\n", note.usage_note));
    }
    output.push_str(&format!("\nNote date: {}\n", note.note_date));

    output
}

fn spec_display(value: &SpecValue) -> String {
    match value {
        SpecValue::Text(text) => text.clone(),
        SpecValue::List(items) => items.join(" + "),
        SpecValue::Flag(flag) => flag.to_string(),
    }
}
