/// Reasons why an evaluation set cannot be built.
///
/// An input with no label occurring twice is not an error: it produces an
/// empty evaluation set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluationError {
    LengthMismatch { images: usize, labels: usize },
    LabelUniverseMismatch { label: String },
    /// The encoder mapped `label` to a column it does not have.
    EncoderIndexOutOfRange {
        label: String,
        index: usize,
        classes: usize,
    },
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationError::LengthMismatch { images, labels } => {
                write!(f, "got {images} images but {labels} labels")
            }
            EvaluationError::LabelUniverseMismatch { label } => {
                write!(f, "label {label} is unknown to the label encoder")
            }
            EvaluationError::EncoderIndexOutOfRange {
                label,
                index,
                classes,
            } => write!(
                f,
                "label encoder mapped {label} to column {index} but has only {classes} classes"
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}
