use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extraction(String),
    #[error("OCR error: {0}")]
    Ocr(String),
    #[error("Vectorization error: {0}")]
    Vectorization(String),
    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
