use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    #[error("section index {index} is out of range (page has {count} sections)")]
    OutOfRange { index: usize, count: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    #[error("viewport observation is not supported here")]
    Unsupported,
    #[error("couldn't observe section: {0}")]
    Observe(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard is unavailable")]
    Unavailable,
    #[error("clipboard write was rejected: {0}")]
    Rejected(String),
}
