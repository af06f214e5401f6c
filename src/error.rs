//! Error type shared by the calculator library.
//!
//! Arithmetic failures never surface here: they are reported in-band through
//! the `"ERR"` display sentinel. These variants cover the edges around the
//! core (token parsing, decimal literals, configuration).

use std::path::PathBuf;

/// Errors produced outside of the button state machine.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// A token that does not name any calculator button.
    #[error("unknown button token `{0}`")]
    UnknownButton(String),

    /// A string that is not a plain decimal literal.
    #[error("invalid decimal literal `{0}`")]
    InvalidDecimal(String),

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::Config`].
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
