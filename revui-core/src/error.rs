use thiserror::Error;

/// Errors surfaced by the jj subprocess layer.
///
/// The rendering core never sees these: the refresh collaborator reports
/// them as a "refresh failed" event and the dashboard keeps showing the
/// last good snapshot.
#[derive(Debug, Error)]
pub enum JjError {
    #[error("failed to run jj: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("jj {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("unparseable log record: {0}")]
    Parse(String),
}
