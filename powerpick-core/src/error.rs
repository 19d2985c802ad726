use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The historical data yielded no usable drawing at all.
    #[error("The data contains no valid drawings.")]
    NoDrawings,

    #[error("Frequency data not loaded")]
    DataNotReady,

    #[error("No numbers available for selection")]
    NoCandidates,

    /// A manually submitted drawing was refused; the collection is untouched.
    #[error("{0}")]
    InvalidDrawing(String),

    #[error("{0}")]
    InvalidTicket(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
