use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("no local variable declaration covers slot {slot} at instruction {point} in {method}")]
    ScopeLookup {
        method: String,
        point: usize,
        slot: u16,
    },

    #[error("instruction at {point} in {method} is not a supported access kind: {kind}")]
    UnsupportedAccessKind {
        method: String,
        point: usize,
        kind: String,
    },

    #[error("no type metadata available for {class}")]
    UnresolvedType { class: String },

    #[error("invalid type descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MutationError>;
