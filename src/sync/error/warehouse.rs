use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarehouseError {
    /// Transport-level failure (connection refused, timeout, body decoding).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The warehouse API answered with a non-success status.
    #[error("Warehouse API returned {status}: {message}")]
    Api { status: u16, message: String },
    /// A load or query job finished with an error result.
    #[error("Warehouse job {job_id} failed: {message}")]
    Job { job_id: String, message: String },
    /// Access token could not be obtained.
    #[error("Failed to obtain warehouse access token: {0}")]
    Auth(String),
    /// Response body did not match the expected shape.
    #[error("Unexpected warehouse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
