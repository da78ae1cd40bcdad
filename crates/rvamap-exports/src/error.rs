use std::path::PathBuf;
use std::process::ExitStatus;

/// Error type of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The export dumper could not be spawned.
    #[error("failed to run {0}: {1}")]
    Spawn(PathBuf, std::io::Error),

    /// The export dumper ran but reported a failure.
    #[error("{program} exited with {status}")]
    DumperStatus {
        /// Program of the dumper.
        program: PathBuf,

        /// Exit status of the dumper.
        status: ExitStatus,
    },

    /// The export dumper output is not valid UTF-8.
    #[error("export dump is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// An export table row has a malformed RVA column.
    #[error("invalid RVA in export row {line:?}")]
    InvalidRva {
        /// The offending table row.
        line: String,

        /// Hexadecimal parsing error.
        #[source]
        source: ParseHexError,
    },
}

/// Error parsing a hexadecimal value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseHexError {
    /// The value starts with a sign.
    #[error("unexpected sign in hexadecimal value")]
    Sign,

    /// The value is not a valid hexadecimal integer.
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;
