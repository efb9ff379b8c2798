use std::path::PathBuf;

/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open or configure the serial port.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: serialport::Error,
    },

    /// An I/O error occurred while writing to the link.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted zero bytes; the link is gone.
    #[error("serial link closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
