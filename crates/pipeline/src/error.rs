use sceneflow_core::CoreError;
use sceneflow_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Scene author failed: {0}")]
    SceneAuthor(String),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Generation surface failed: {0}")]
    Surface(String),

    #[error("Batch item {index} out of range (queue length {len})")]
    ItemOutOfRange { index: usize, len: usize },
}
