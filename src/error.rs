use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherStreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode code point after two consecutive reads")]
    UnableToTransform,

    #[error("offset of zero would leave every code point unchanged")]
    ZeroOffset,

    #[error("caesar cipher requires a key")]
    MissingKey,

    #[error("code point {0:?} is outside the Latin-1 range")]
    OutsideLatin1(char),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, CipherStreamError>;
