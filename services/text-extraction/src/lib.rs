//! Best-effort text extraction for heterogeneous uploads.
//!
//! Documents arrive as raw PDF bytes in wildly different shapes: clean
//! text layers, Word exports, or pure scans of handwritten pages. The
//! pipeline runs an ordered chain of extraction strategies (direct text
//! layer first, rasterize-and-recognize second) and returns whatever
//! text it can scrape together. It never fails on a document: corrupt or
//! unrecognizable input yields empty text, which downstream scoring
//! treats as zero similarity signal.

pub mod ocr;
pub mod pipeline;
pub mod raster;
pub mod strategy;

pub use ocr::{OcrFallback, PageSegmentation, TesseractRecognizer, TextRecognizer};
pub use pipeline::{ExtractionPipeline, SUBSTANTIAL_CONTENT_CHARS};
pub use raster::{PageRasterizer, PopplerRasterizer, RasterBatch};
pub use strategy::{ExtractionStrategy, TextLayer};
