/// Persistence-service client errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected request ({status}): {message}")]
    Api { status: u16, message: String },
}
