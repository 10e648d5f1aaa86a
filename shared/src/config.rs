use serde::Deserialize;

fn default_tesseract_languages() -> String {
    "eng+ara".into()
}

fn default_pdftoppm_path() -> String {
    "pdftoppm".into()
}

fn default_raster_dpi() -> u32 {
    400
}

fn default_noise_floor() -> f32 {
    0.1
}

fn default_high_similarity() -> f32 {
    70.0
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Language string handed to tesseract, e.g. "eng+ara".
    #[serde(default = "default_tesseract_languages")]
    pub tesseract_languages: String,
    /// Directory holding the tesseract language data. None lets the
    /// binding fall back to its compiled-in location.
    #[serde(default)]
    pub tessdata_dir: Option<String>,
    #[serde(default = "default_pdftoppm_path")]
    pub pdftoppm_path: String,
    #[serde(default = "default_raster_dpi")]
    pub raster_dpi: u32,
    /// Pairs scoring at or below this are discarded as noise.
    #[serde(default = "default_noise_floor")]
    pub noise_floor: f32,
    /// Reporting cutoff for "flag as suspicious"; a caller-side policy.
    #[serde(default = "default_high_similarity")]
    pub high_similarity: f32,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tesseract_languages: default_tesseract_languages(),
            tessdata_dir: None,
            pdftoppm_path: default_pdftoppm_path(),
            raster_dpi: default_raster_dpi(),
            noise_floor: default_noise_floor(),
            high_similarity: default_high_similarity(),
        }
    }
}
