//! Error types returned by [`Session`](crate::session::Session) operations.
use std::error;
use std::fmt;

/// An error raised by a [`Session`](crate::session::Session) operation.
///
/// All variants are reported synchronously at the failing call; none are
/// swallowed, and none require retry semantics. Queries over an empty
/// histogram are *not* an error: they return `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Dimensionality `<= 0`, a non-positive bin count, an inverted
    /// `(lo, hi)` range, or mismatched vector lengths in a configuration
    /// call.
    InvalidArg(String),
    /// A sample was added before a `BinSpec` was installed on every axis.
    NotConfigured,
    /// An attempt was made to change the binning scheme after samples had
    /// already been added.
    AlreadyConfigured,
    /// Explicit per-axis boundaries were requested together with more than
    /// one shifted grid (`R > 1`); shifting is undefined for this scheme.
    RequiresR1,
    /// A sample vector's length did not match the Session's dimensionality.
    DimMismatch {
        /// The Session's configured dimensionality.
        expected: usize,
        /// The length of the vector that was passed in.
        found: usize,
    },
    /// A role vector was the wrong length, used a tag not allowed for the
    /// requested query, or omitted a tag the query requires.
    BadRoleVector(String),
    /// An internal invariant was violated: a bin coordinate fell outside
    /// the legal range for the installed `BinSpec`. Indicates a bug in this
    /// crate, not a caller error.
    InvalidCoord,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidArg(msg) => write!(f, "invalid argument: {}", msg),
            SessionError::NotConfigured => {
                write!(f, "no BinSpec has been installed on every axis yet")
            }
            SessionError::AlreadyConfigured => write!(
                f,
                "binning cannot be changed after samples have been added"
            ),
            SessionError::RequiresR1 => write!(
                f,
                "explicit bin boundaries require a single shifted grid (R <= 1)"
            ),
            SessionError::DimMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected a vector of length {}, found {}",
                expected, found
            ),
            SessionError::BadRoleVector(msg) => write!(f, "bad role vector: {}", msg),
            SessionError::InvalidCoord => {
                write!(f, "internal error: bin coordinate out of range")
            }
        }
    }
}

impl error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::SessionError;

    #[test]
    fn display_does_not_panic_for_every_variant() {
        let variants = vec![
            SessionError::InvalidArg("D must be >= 1".into()),
            SessionError::NotConfigured,
            SessionError::AlreadyConfigured,
            SessionError::RequiresR1,
            SessionError::DimMismatch {
                expected: 3,
                found: 2,
            },
            SessionError::BadRoleVector("missing target tag".into()),
            SessionError::InvalidCoord,
        ];
        for variant in variants {
            assert!(!variant.to_string().is_empty());
        }
    }
}
