use std::path::PathBuf;
use thiserror::Error;

/// Failures reading credentials, seed data or talking to the store.
///
/// Display strings are printed as-is by the command-line tools.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing service account key. Provide serviceAccountKey.json or set SERVICE_ACCOUNT_KEY.")]
    MissingKey,

    #[error("Invalid service account key at {}: {}", .path.display(), .source)]
    InvalidKey {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing seed file at {}", .0.display())]
    MissingSeedFile(PathBuf),

    #[error("Seed file is not valid JSON: {0}")]
    InvalidSeedJson(#[source] serde_json::Error),

    #[error("Seed file must be a JSON array")]
    NotAnArray,

    #[error("Seed recipe #{index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Seed recipe #{index} is invalid: {reason}")]
    InvalidRecipe { index: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}
