/// All fallible library functions return a `Result` with this error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when asked to modify a buffer that is not structurally a
    /// valid PNG (bad signature, or a missing IHDR/IEND anchor chunk).
    /// Proceeding would silently produce a broken image, so this is fatal.
    #[error("invalid source: {0}")]
    InvalidSource(&'static str),
    /// Returned when a chunk payload would not fit in its 32 bit length field.
    #[error("chunk size over u32 limit")]
    ChunkSizeOverflow,
    /// Returned when embedded text is not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
    /// Returned when the session envelope cannot be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Returned when a data URL payload is not valid base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
