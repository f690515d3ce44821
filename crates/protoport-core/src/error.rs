use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("language not specified")]
    LanguageNotSpecified,
    #[error("language not supported: {0}")]
    LanguageNotSupported(String),
    #[error("unsafe path: {0}")]
    UnsafePath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
