use std::path::Path;

use tesseract::Tesseract;
use tracing::debug;

use shared::error::{AppError, Result};

use crate::raster::PageRasterizer;
use crate::strategy::ExtractionStrategy;

/// Page layout assumptions tried per rasterized page. No single setting
/// handles mixed printed/handwritten submissions, so every page runs
/// through the whole set and the distinct outputs are unioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSegmentation {
    /// PSM 6, a single uniform block of text.
    Block,
    /// PSM 11, sparse text in no particular order; the best bet for
    /// handwriting.
    Sparse,
    /// PSM 1, single column with orientation and script detection.
    SingleColumnOsd,
    /// PSM 3, fully automatic segmentation.
    Auto,
    /// PSM 8, the page as one word.
    SingleWord,
}

impl PageSegmentation {
    pub const ALL: [PageSegmentation; 5] = [
        PageSegmentation::Block,
        PageSegmentation::Sparse,
        PageSegmentation::SingleColumnOsd,
        PageSegmentation::Auto,
        PageSegmentation::SingleWord,
    ];

    fn tesseract_value(self) -> &'static str {
        match self {
            PageSegmentation::Block => "6",
            PageSegmentation::Sparse => "11",
            PageSegmentation::SingleColumnOsd => "1",
            PageSegmentation::Auto => "3",
            PageSegmentation::SingleWord => "8",
        }
    }
}

pub trait TextRecognizer {
    fn recognize(&self, image: &Path, mode: PageSegmentation) -> Result<String>;
}

/// Recognizer backed by the tesseract library. Language data location
/// and language string are explicit construction inputs rather than
/// ambient environment reads, and a probe init runs once here so missing
/// language packs surface at the boundary instead of per page.
pub struct TesseractRecognizer {
    datapath: Option<String>,
    languages: String,
}

impl TesseractRecognizer {
    pub fn new(datapath: Option<String>, languages: &str) -> Result<Self> {
        Tesseract::new(datapath.as_deref(), Some(languages))
            .map_err(|e| AppError::Ocr(format!("tesseract init failed: {e}")))?;
        Ok(Self {
            datapath,
            languages: languages.to_string(),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &Path, mode: PageSegmentation) -> Result<String> {
        let path = image
            .to_str()
            .ok_or_else(|| AppError::Ocr(format!("non-utf8 image path {image:?}")))?;
        let mut tess = Tesseract::new(self.datapath.as_deref(), Some(self.languages.as_str()))
            .map_err(|e| AppError::Ocr(format!("tesseract init failed: {e}")))?
            .set_variable("tessedit_pageseg_mode", mode.tesseract_value())
            .map_err(|e| AppError::Ocr(format!("setting segmentation mode failed: {e}")))?
            .set_image(path)
            .map_err(|e| AppError::Ocr(format!("loading page image failed: {e}")))?;
        tess.get_text()
            .map_err(|e| AppError::Ocr(format!("recognition failed: {e}")))
    }
}

/// Optical fallback strategy: rasterize every page, recognize each one
/// under all segmentation modes, and keep the union of distinct
/// non-empty outputs in mode order.
pub struct OcrFallback<R, T> {
    rasterizer: R,
    recognizer: T,
}

impl<R, T> OcrFallback<R, T> {
    pub fn new(rasterizer: R, recognizer: T) -> Self {
        Self {
            rasterizer,
            recognizer,
        }
    }
}

impl<R: PageRasterizer, T: TextRecognizer> ExtractionStrategy for OcrFallback<R, T> {
    fn label(&self) -> &'static str {
        "ocr"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let batch = self.rasterizer.rasterize(data)?;
        let mut sections: Vec<String> = Vec::new();
        for (idx, page) in batch.pages.iter().enumerate() {
            let page_no = idx + 1;
            let mut outputs: Vec<String> = Vec::new();
            for mode in PageSegmentation::ALL {
                match self.recognizer.recognize(page, mode) {
                    Ok(text) => {
                        if !text.trim().is_empty() && !outputs.contains(&text) {
                            outputs.push(text);
                        }
                    }
                    Err(e) => debug!(%e, page = page_no, ?mode, "recognition attempt failed"),
                }
            }
            if !outputs.is_empty() {
                sections.push(format!(
                    "--- Page {page_no} (OCR) ---\n{}",
                    outputs.join("\n")
                ));
            }
        }
        Ok(sections.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segmentation_values_match_tesseract_psm_numbers() {
        let values: Vec<&str> = PageSegmentation::ALL
            .iter()
            .map(|m| m.tesseract_value())
            .collect();
        assert_eq!(values, ["6", "11", "1", "3", "8"]);
    }
}
