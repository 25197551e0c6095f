use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

/// Failure causes of a patch run. Every variant is terminal: nothing is
/// retried, and `main` maps any of them to exit code 1.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("could not decode distribution config")]
    ParseFailed(#[from] serde_json::Error),

    #[error("could not write {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Update call refused by CloudFront. A stale ETag lands here too, as a
    /// plain command failure carrying the CLI's stderr.
    #[error("update rejected for distribution {id}: {detail}")]
    UpdateRejected { id: String, detail: String },
}
