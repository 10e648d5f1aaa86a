use tracing::{info, warn};

use shared::config::Settings;
use shared::dto::ExtractedText;
use shared::error::Result;

use crate::ocr::{OcrFallback, TesseractRecognizer};
use crate::raster::PopplerRasterizer;
use crate::strategy::{ExtractionStrategy, TextLayer};

/// A text layer longer than this is trusted outright and the remaining
/// strategies are skipped. OCR on a born-digital document only adds
/// recognition noise.
pub const SUBSTANTIAL_CONTENT_CHARS: usize = 100;

/// Ordered fallback chain over extraction strategies. Construction
/// validates the external tool setup; `extract` itself never fails. A
/// document that defeats every strategy contributes empty text.
pub struct ExtractionPipeline {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractionPipeline {
    /// Full chain: direct text layer, then rasterize + recognize.
    /// Fails when the rasterizer binary or tesseract language data is
    /// missing, so misconfiguration is reported once, up front.
    pub fn new(settings: &Settings) -> Result<Self> {
        let rasterizer = PopplerRasterizer::new(&settings.pdftoppm_path, settings.raster_dpi)?;
        let recognizer = TesseractRecognizer::new(
            settings.tessdata_dir.clone(),
            &settings.tesseract_languages,
        )?;
        Ok(Self::with_strategies(vec![
            Box::new(TextLayer),
            Box::new(OcrFallback::new(rasterizer, recognizer)),
        ]))
    }

    /// Text layer only, for environments without the OCR toolchain.
    pub fn text_layer_only() -> Self {
        Self::with_strategies(vec![Box::new(TextLayer)])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, document_id: &str, data: &[u8]) -> ExtractedText {
        let mut sections: Vec<String> = Vec::new();
        let mut contributed: Vec<&'static str> = Vec::new();

        for strategy in &self.strategies {
            let accumulated: usize = sections.iter().map(|s| s.chars().count()).sum();
            if accumulated > SUBSTANTIAL_CONTENT_CHARS {
                info!(
                    step = "extract.short_circuit",
                    id = %document_id,
                    chars = accumulated,
                    skipped = strategy.label(),
                    "substantial text layer, skipping fallback"
                );
                break;
            }
            match strategy.extract(data) {
                Ok(text) => {
                    if !text.trim().is_empty() {
                        contributed.push(strategy.label());
                        sections.push(text);
                    }
                }
                Err(e) => {
                    warn!(%e, id = %document_id, strategy = strategy.label(), "strategy failed, continuing");
                }
            }
        }

        let text = sections.join("\n").trim().to_string();
        let ocr_used = contributed.contains(&"ocr");
        info!(
            step = "extract.done",
            id = %document_id,
            chars = text.chars().count(),
            ocr_used,
            methods = ?contributed,
            "document extracted"
        );
        ExtractedText {
            document_id: document_id.to_string(),
            text,
            ocr_used,
        }
    }
}
