#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {0}: {1}")]
    HttpStatus(reqwest::StatusCode, String),
}

impl ApiError {
    /// Status code for responses the server answered with an error.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http(err) => err.status(),
            Self::HttpStatus(status, _) => Some(*status),
        }
    }
}
