//! Error types for DSN parsing and rewriting.

use thiserror::Error;

/// Result type alias for DSN operations.
pub type DsnResult<T> = Result<T, DsnError>;

/// Errors produced while parsing or rewriting a connection string.
///
/// All variants are terminal for the current call: no partial descriptor is
/// ever returned. Error text never contains the password fragment of the
/// input.
#[derive(Error, Debug)]
pub enum DsnError {
    /// No `/` separates the database name from the rest of the string.
    #[error("invalid DSN: missing the slash separating the database name")]
    MissingSlash,

    /// A required `@`, `(` or `)` separator is absent.
    #[error("invalid DSN: missing '@' or '(' or ')' separating the necessary parts")]
    MissingSymbol,

    /// The network address opens with `(` but never closes.
    #[error("invalid DSN: network address not terminated (missing closing parenthesis)")]
    UnterminatedAddress,

    /// A literal `)` appears inside the network address.
    #[error("invalid DSN: unescaped ')' inside the network address")]
    UnescapedParen,

    /// A duration-valued parameter could not be parsed.
    #[error("invalid duration value {value:?}")]
    InvalidDuration {
        /// The offending parameter value.
        value: String,
    },

    /// Strict mode rejected a parameter the active dialect does not know.
    #[error("unsupported connection parameter {name:?}")]
    UnknownParameter {
        /// The canonical parameter name.
        name: String,
    },

    /// Writing the cluster service descriptor file failed.
    #[error("failed to write cluster service descriptor")]
    ServiceConfigWrite(#[source] std::io::Error),
}
