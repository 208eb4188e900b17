use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PokedexError>;

#[derive(Error, Debug)]
pub enum PokedexError {
    /// A static asset is missing, unreadable or does not match its schema.
    #[error("failed to load asset {}: {reason}", .path.display())]
    AssetLoad { path: PathBuf, reason: String },

    /// The class has no entry in the attribute table or no sprite.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("invalid chart input: {0}")]
    InvalidChartInput(String),

    #[error("composition failed: {0}")]
    Composition(String),

    #[error("classification failed: {0}")]
    Classification(String),

    /// The uploaded bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("logging failed: {0}")]
    Logging(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PokedexError {
    pub fn asset_load(path: &Path, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn is_unknown_class(&self) -> bool {
        matches!(self, Self::UnknownClass(_))
    }
}
