use thiserror::Error;

/// Failures surfaced while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {id:?}: {reason}")]
    Malformed { id: String, reason: String },
    #[error("duplicate {field} {value:?}")]
    Duplicate { field: &'static str, value: String },
    #[error("no record matches {0:?}")]
    RecordNotFound(String),
}

/// Reasons an external model could not be used. Never fatal: the placeholder stays mounted.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {path:?} unavailable: {reason}")]
    Unavailable { path: String, reason: String },
    #[error("asset {path:?} could not be decoded: {reason}")]
    Decode { path: String, reason: String },
}

impl AssetError {
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Unavailable { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}
