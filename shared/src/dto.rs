use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded document: caller-assigned identifier plus raw bytes.
/// The core never interprets the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: String,
    pub data: Vec<u8>,
}

/// Best-effort text for one document. Sub-method provenance is tagged
/// inline via page headers; `ocr_used` records whether the optical
/// branch contributed anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub document_id: String,
    pub text: String,
    pub ocr_used: bool,
}

/// One scored pair of batch members, indices into the submitted order.
/// `text1_index` is always strictly less than `text2_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub text1_index: usize,
    pub text2_index: usize,
    /// Rounded to one decimal, in (0, 100].
    pub similarity: f32,
    pub text1_preview: String,
    pub text2_preview: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub chars: usize,
    pub ocr_used: bool,
}

/// Batch output handed back to the orchestrator.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub batch_id: Uuid,
    pub documents: Vec<DocumentSummary>,
    pub pairs: Vec<SimilarityPair>,
    /// Number of leading `pairs` entries at or above the reporting cutoff.
    pub flagged: usize,
}
