use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("source object {bucket}/{key} not found")]
    SourceNotFound { bucket: String, key: String },

    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode resized image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("could not read source image: {0}")]
    Read(#[source] ObjectStoreError),

    #[error("could not write resized image: {0}")]
    Write(#[source] ObjectStoreError),

    #[error("resize did not complete within {seconds}s")]
    Timeout { seconds: u64 },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("endpoint invocation failed: {0}")]
    Invocation(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    #[error("malformed probability vector: {0}")]
    Probabilities(#[from] mammoscan_common::ProbabilityError),
}
