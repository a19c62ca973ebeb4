use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no page is registered for {0}")]
    UnknownRoute(String),
}
