//! cxr-rs CLI for radiograph analysis.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cxr_clinical::{TriageLevel, CRITICAL_LABELS, URGENT_LABELS};
use cxr_core::backend::{Autodiff, NdArray};
use cxr_core::{Label, PipelineConfig};
use cxr_models::{load_weights, ChestResNetConfig};
use cxr_pipeline::Pipeline;

/// Backend type for analysis.
type AnalysisBackend = Autodiff<NdArray>;

#[derive(Parser)]
#[command(name = "cxr")]
#[command(author, version)]
#[command(about = "Explainable chest radiograph triage - analyze X-ray images from the shell")]
#[command(long_about = "cxr-rs: explainable chest radiograph triage.

EXAMPLES:
  # List the findings the classifier reports
  cxr labels

  # Analyze a radiograph with trained weights
  cxr analyze --image scan.png --checkpoint weights/chest.mpk

  # Machine-readable output, heatmap written next to the report
  cxr analyze --image scan.png --checkpoint weights/chest.mpk \\
      --json --heatmap overlay.jpg")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one radiograph and print the triage report
    Analyze {
        /// Path to the radiograph (PNG or JPEG)
        #[arg(long, value_name = "FILE")]
        image: PathBuf,

        /// Path to a trained checkpoint (named MessagePack)
        #[arg(long, value_name = "FILE")]
        checkpoint: Option<PathBuf>,

        /// Emit the full report as JSON instead of the summary table
        #[arg(long, default_value = "false")]
        json: bool,

        /// Write the heatmap overlay JPEG to this path
        #[arg(long, value_name = "FILE")]
        heatmap: Option<PathBuf>,

        /// Network input side length
        #[arg(long, default_value = "224", value_name = "PX")]
        input_size: usize,

        /// Detection threshold for the triage rules
        #[arg(long, default_value = "0.5", value_name = "P")]
        threshold: f32,
    },
    /// List the findings and their triage tiers
    Labels,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    match cli.command {
        Commands::Analyze {
            image,
            checkpoint,
            json,
            heatmap,
            input_size,
            threshold,
        } => handle_analyze(image, checkpoint, json, heatmap, input_size, threshold),
        Commands::Labels => handle_labels(),
    }
}

fn handle_analyze(
    image: PathBuf,
    checkpoint: Option<PathBuf>,
    json: bool,
    heatmap: Option<PathBuf>,
    input_size: usize,
    threshold: f32,
) -> Result<()> {
    let device = Default::default();
    let model = ChestResNetConfig::new(Label::COUNT)
        .with_input_size(input_size)
        .init::<AnalysisBackend>(&device);

    let model = match checkpoint {
        Some(path) => load_weights::<AnalysisBackend, _>(model, &path, &device)
            .context(format!("Failed to load checkpoint {:?}", path))?,
        None => {
            tracing::warn!("no checkpoint given, analyzing with untrained weights");
            model
        }
    };

    let config = PipelineConfig::default()
        .with_input_size(input_size)
        .with_threshold(threshold);
    let pipeline =
        Pipeline::new(model, config, device).context("Failed to assemble the pipeline")?;

    let bytes = std::fs::read(&image).context(format!("Failed to read image {:?}", image))?;
    let report = pipeline
        .analyze_bytes(&bytes)
        .context("Radiograph analysis failed")?;

    if let Some(path) = heatmap {
        match &report.heatmap_base64 {
            Some(encoded) => {
                let jpeg = STANDARD
                    .decode(encoded)
                    .context("Heatmap payload is not valid base64")?;
                std::fs::write(&path, jpeg)
                    .context(format!("Failed to write heatmap to {:?}", path))?;
                println!("Heatmap written to {:?}\n", path);
            }
            None => {
                println!(
                    "Heatmap unavailable: {}\n",
                    report.heatmap_error.as_deref().unwrap_or("unknown reason")
                );
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Radiograph Analysis ===\n");
    println!("Audit id: {}", report.audit_id);
    println!();
    println!("Findings:");
    println!("─────────────────────────────────────────");
    for row in &report.predictions {
        let marker = if row.probability > threshold { "*" } else { " " };
        println!(
            "{} {:<14} {:>7.2}%",
            marker,
            row.label.name(),
            row.probability * 100.0
        );
    }
    println!();
    println!(
        "Triage: {} ({})",
        report.triage.level, report.triage.color
    );
    println!("Action: {}", report.triage.action);
    println!();
    println!("{}", report.narrative);

    Ok(())
}

fn handle_labels() -> Result<()> {
    println!("Reported findings ({} labels):\n", Label::COUNT);
    println!("{:<6}{:<16}{}", "Index", "Finding", "Escalation");
    println!("─────────────────────────────────────────");
    for (i, label) in Label::ALL.iter().enumerate() {
        let tier = if CRITICAL_LABELS.contains(label) {
            TriageLevel::Critical.as_str()
        } else if URGENT_LABELS.contains(label) {
            TriageLevel::Urgent.as_str()
        } else {
            "none"
        };
        println!("{:<6}{:<16}{}", i, label.name(), tier);
    }
    println!("\nA finding escalates when its probability is strictly above the threshold.");
    Ok(())
}
