/// Everything that can end a run. A run either fully succeeds or fails with
/// one of these, nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Acquiring {url}: {reason}")]
    Acquire { url: String, reason: String },
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decoding event log line {line}: {reason}")]
    Decode { line: usize, reason: String },
    #[error("Analysis: {0}")]
    Analysis(#[from] analysis::Error),
    #[error("Image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Publishing stats returned {status}: {body}")]
    Publish { status: u16, body: String },
    #[error("Uploading {name}: {reason}")]
    Upload { name: String, reason: String },
    #[error("Background task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing '--{0}' for the configured storage")]
    Missing(&'static str),
    #[error("S3 credentials: {0}")]
    Credentials(#[from] s3::creds::error::CredentialsError),
    #[error("S3 bucket: {0}")]
    Bucket(#[from] s3::error::S3Error),
    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
