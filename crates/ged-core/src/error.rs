//! Error type for the buffer and operation layer.
//!
//! The contract across the store/operation boundary is deliberately flat:
//! an operation either succeeds or fails, and no caller is expected to
//! branch on the failure kind to recover. Internally the causes are still
//! tagged — allocation, I/O, invalid argument, corrupt lead byte — so the
//! dispatcher can show a differentiated message and the log records what
//! actually went wrong.

use std::io;

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure causes inside the buffer and operation layer.
///
/// Callers treat any variant as "the operation did not happen" (except the
/// documented partial-paste case). The variants exist for diagnostics, not
/// for control flow.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage or clipboard allocation failed. The buffer is left
    /// byte-for-byte unchanged.
    #[error("buffer allocation failed")]
    Alloc,

    /// File open / read / write / close failure during load or save.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// A caller-supplied argument the operation cannot act on, e.g. saving
    /// with no filename recorded.
    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),

    /// A byte that cannot lead a symbol was found where a lead byte was
    /// required. Fatal for the consumer that hit it (the renderer aborts
    /// the frame).
    #[error("corrupt symbol lead byte {0:#04x}")]
    BadSymbol(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::Alloc.to_string(), "buffer allocation failed");
        assert_eq!(
            Error::InvalidArg("no filename").to_string(),
            "invalid argument: no filename"
        );
        assert_eq!(
            Error::BadSymbol(0x80).to_string(),
            "corrupt symbol lead byte 0x80"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
