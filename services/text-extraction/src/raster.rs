use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use shared::error::{AppError, Result};

/// Page images produced for one document. The scratch directory is kept
/// alive for as long as the paths are in use and removed on drop.
pub struct RasterBatch {
    pub pages: Vec<PathBuf>,
    _workdir: Option<TempDir>,
}

impl RasterBatch {
    /// Wraps pre-existing image paths, for recognizer tests.
    pub fn from_pages(pages: Vec<PathBuf>) -> Self {
        Self {
            pages,
            _workdir: None,
        }
    }
}

pub trait PageRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<RasterBatch>;
}

/// Rasterizes via the poppler `pdftoppm` binary. The binary path and DPI
/// come from configuration; availability is probed at construction so a
/// missing install is reported once, not per document.
pub struct PopplerRasterizer {
    binary: String,
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(binary: &str, dpi: u32) -> Result<Self> {
        Command::new(binary)
            .arg("-v")
            .output()
            .map_err(|e| AppError::Io(format!("rasterizer binary {binary:?} unavailable: {e}")))?;
        Ok(Self {
            binary: binary.to_string(),
            dpi,
        })
    }
}

impl PageRasterizer for PopplerRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<RasterBatch> {
        let workdir =
            tempfile::tempdir().map_err(|e| AppError::Io(format!("tempdir failed: {e}")))?;
        let input = workdir.path().join("input.pdf");
        std::fs::write(&input, data)
            .map_err(|e| AppError::Io(format!("writing scratch pdf failed: {e}")))?;

        let prefix = workdir.path().join("page");
        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(&prefix)
            .output()
            .map_err(|e| AppError::Io(format!("spawning {:?} failed: {e}", self.binary)))?;
        if !output.status.success() {
            return Err(AppError::Extraction(format!(
                "rasterization failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // pdftoppm zero-pads the page counter, so a name sort is a page sort.
        let mut pages: Vec<PathBuf> = std::fs::read_dir(workdir.path())
            .map_err(|e| AppError::Io(e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();
        debug!(pages = pages.len(), dpi = self.dpi, "document rasterized");

        Ok(RasterBatch {
            pages,
            _workdir: Some(workdir),
        })
    }
}
