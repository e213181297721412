use thiserror::Error;

/// Everything that can go wrong in the sketch-classification pipeline.
///
/// All failures are reported through this enum at the operation boundary;
/// none of them abort the process. "Nothing saved yet" is deliberately not
/// here — see `persist::LoadOutcome::Absent`.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The drawing surface produced no usable raster data.
    #[error("no canvas image is available")]
    SourceNotReady,

    /// An example was committed under a label that is not in the vocabulary.
    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    /// Label names must be non-empty.
    #[error("label name must not be empty")]
    EmptyLabel,

    /// Label names must be unique.
    #[error("label '{0}' already exists")]
    DuplicateLabel(String),

    /// The vocabulary must keep at least one label at all times.
    #[error("cannot remove the last remaining label")]
    LastLabel,

    /// Too few accumulated examples to start a training run.
    #[error("not enough examples to train: have {have}, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    /// A numeric or runtime failure during fitting. The previously live
    /// model (if any) is left untouched.
    #[error("training failed: {0}")]
    TrainingFailed(String),

    /// Prediction was requested before any model was trained or loaded.
    #[error("no trained model is available yet")]
    ModelNotReady,

    /// Writing the weights/labels pair to the store failed.
    #[error("saving model failed: {0}")]
    SaveFailed(String),

    /// The persisted label list does not match the persisted model's output
    /// width. Using the pair anyway would corrupt the label↔index mapping,
    /// so it is rejected.
    #[error("persisted state is inconsistent: {labels} labels for a model with {outputs} outputs")]
    StateMismatch { labels: usize, outputs: usize },
}
