use thiserror::Error;

/// Failures the scene can observe. None of them are fatal; the frame loop
/// logs them and keeps going.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to load model from {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("text sink for stat '{tag}' rejected write: {reason}")]
    Sink { tag: String, reason: String },

    #[error("render failed: {0}")]
    Render(String),
}

impl SceneError {
    pub fn asset_load(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
