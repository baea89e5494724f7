use thiserror::Error;

use crate::backend::Backend;
use crate::plan::Field;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Binary contains unknown/mixed modifications, revert changes first")]
    SignatureUnrecognized,

    #[error(
        "Binary contains unknown modifications, revert changes first ({field}: expected {expected} occurrence(s), found {actual})"
    )]
    CountMismatch {
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("Length of modified binary does not match length of original: {expected} -> {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Value {text:?} does not fit into a {width} byte field")]
    FieldOverflow { text: String, width: usize },

    #[error("Binary uses {actual}, not {expected}")]
    SourceMismatch { expected: Backend, actual: Backend },

    #[error("Unsupported backend transition: {from} -> {to}")]
    UnsupportedTransition { from: Backend, to: Backend },

    #[error("Battlefield 2 install directory not found")]
    InstallDirNotFound,

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if the binary has to be reverted by hand before it can be patched
    pub fn needs_revert(&self) -> bool {
        matches!(
            self,
            Error::SignatureUnrecognized | Error::CountMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_needs_revert() {
        assert!(Error::SignatureUnrecognized.needs_revert());
        assert!(
            Error::CountMismatch {
                field: Field::StatsHost,
                expected: 2,
                actual: 3,
            }
            .needs_revert()
        );
        assert!(
            !Error::SourceMismatch {
                expected: Backend::Openspy,
                actual: Backend::Gamespy,
            }
            .needs_revert()
        );
        assert!(
            !Error::LengthMismatch {
                expected: 10,
                actual: 9,
            }
            .needs_revert()
        );
    }

    #[test]
    fn test_count_mismatch_names_field() {
        let err = Error::CountMismatch {
            field: Field::GpcmHost,
            expected: 1,
            actual: 0,
        };
        let message = err.to_string();
        assert!(message.contains("gpcm host"));
        assert!(message.contains("found 0"));
    }
}
