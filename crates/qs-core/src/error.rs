use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("bad file name: {0}")]
    BadName(String),

    #[error("file not found")]
    NotFound,

    #[error("no files")]
    NoFiles,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
