use thiserror::Error;

// * Unified Error type for dataset loading.
// * Only whole-load failures live here; bad lines are skipped, not raised.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset request returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid dataset URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Dataset is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
