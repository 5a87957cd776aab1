//! Error types for netframe

use thiserror::Error;

/// Result type alias for netframe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for netframe
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer too short, a length field out of bounds, or an unparsable address
    #[error("Format error: {0}")]
    Format(String),

    /// A layer tag does not name the codec expected for the next layer
    #[error("{field} is not {expected}, found {found}")]
    ProtocolMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Header checksum did not verify (only raised when verification is requested)
    #[error("IPv4 header checksum mismatch: expected 0x{expected:04X}, found 0x{found:04X}")]
    ChecksumMismatch { expected: u16, found: u16 },

    /// The message recovered from a frame differs from the one sent
    #[error("Roundtrip mismatch: sent {sent:?}, received {received:?}")]
    RoundtripMismatch { sent: String, received: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a format error with a custom message
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create a protocol mismatch error
    pub fn protocol_mismatch<F, E, V>(field: F, expected: E, found: V) -> Self
    where
        F: Into<String>,
        E: Into<String>,
        V: Into<String>,
    {
        Error::ProtocolMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// True for [`Error::Format`]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// True for [`Error::ProtocolMismatch`]
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(self, Error::ProtocolMismatch { .. })
    }
}
