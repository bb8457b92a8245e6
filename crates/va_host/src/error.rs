/// Overlay host errors.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("not a valid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    #[error("no user is signed in")]
    NotSignedIn,
}
