//! Command-line batch runner: reads a directory of PDF submissions,
//! extracts and normalizes each one, ranks all pairs, and reports the
//! ones worth a second look. Plays the orchestrator role that a web
//! frontend would otherwise own.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use uuid::Uuid;

use shared::config::Settings;
use shared::dto::{AnalysisReport, DocumentSummary, ExtractedText};
use similarity::{clean, EngineConfig, SimilarityEngine};
use text_extraction::ExtractionPipeline;

#[derive(Parser, Debug)]
#[command(version, about = "Ranks a directory of PDF submissions by pairwise text similarity")]
struct Args {
    /// Directory containing the submissions (*.pdf)
    input_dir: PathBuf,
    /// Overrides the configured high-similarity reporting cutoff
    #[arg(long)]
    threshold: Option<f32>,
    /// Emit the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Skip the OCR fallback even when the toolchain is available
    #[arg(long)]
    no_ocr: bool,
}

fn collect_pdfs(dir: &PathBuf) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading input directory {dir:?}"))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    // name order defines the batch indices
    paths.sort();
    Ok(paths)
}

fn build_pipeline(args: &Args, settings: &Settings) -> ExtractionPipeline {
    if args.no_ocr {
        return ExtractionPipeline::text_layer_only();
    }
    match ExtractionPipeline::new(settings) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            warn!(%e, "ocr toolchain unavailable, continuing with text layer only");
            ExtractionPipeline::text_layer_only()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let settings = Settings::new().context("loading settings from environment")?;
    let threshold = args.threshold.unwrap_or(settings.high_similarity);

    let paths = collect_pdfs(&args.input_dir)?;
    if paths.is_empty() {
        bail!("no pdf files found in {:?}", args.input_dir);
    }

    let batch_id = Uuid::new_v4();
    info!(batch = %batch_id, documents = paths.len(), threshold, "starting batch analysis");

    let pipeline = build_pipeline(&args, &settings);
    let mut extracted: Vec<ExtractedText> = Vec::with_capacity(paths.len());
    for path in &paths {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path).with_context(|| format!("reading {path:?}"))?;
        extracted.push(pipeline.extract(&id, &data));
    }

    let normalized: Vec<String> = extracted.iter().map(|doc| clean(&doc.text)).collect();
    let engine = SimilarityEngine::new(EngineConfig {
        noise_floor: settings.noise_floor,
        ..EngineConfig::default()
    });
    let pairs = engine.rank(&normalized);
    let flagged = pairs.iter().take_while(|p| p.similarity >= threshold).count();
    info!(batch = %batch_id, pairs = pairs.len(), flagged, "batch analysis complete");

    let report = AnalysisReport {
        batch_id,
        documents: extracted
            .iter()
            .map(|doc| DocumentSummary {
                id: doc.document_id.clone(),
                chars: doc.text.chars().count(),
                ocr_used: doc.ocr_used,
            })
            .collect(),
        pairs,
        flagged,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("batch {batch_id}");
    for doc in &report.documents {
        let method = if doc.ocr_used { "ocr" } else { "text-layer" };
        println!("  {:<40} {:>8} chars  ({method})", doc.id, doc.chars);
    }
    if report.pairs.is_empty() {
        println!("no pairs above the noise floor");
        return Ok(());
    }
    println!("{:>6}  pair", "score");
    for pair in &report.pairs {
        let mark = if pair.similarity >= threshold {
            "  <-- above threshold"
        } else {
            ""
        };
        println!(
            "{:>6.1}  {} / {}{mark}",
            pair.similarity,
            report.documents[pair.text1_index].id,
            report.documents[pair.text2_index].id,
        );
    }
    Ok(())
}
