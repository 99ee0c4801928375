//! Conversion errors.

use std::convert::Infallible;
use thiserror::Error;

/// Errors that can occur during a conversion.
///
/// Every variant except [`ConvertError::Generator`] is raised before the
/// generator is read, or leaves the converter exactly as it was before the
/// failing call. `E` is the generator's own error type, carried unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError<E = Infallible> {
    #[error("invalid output range")]
    InvalidOutputRange,
    #[error("invalid input range")]
    InvalidInputRange,
    #[error("buffer type too small for the input range")]
    BufferTooSmall,
    #[error("output range too large for the buffering limit")]
    RangeTooLarge,
    #[error("generator returned a value outside its declared range")]
    SourceOutOfRange,
    #[error("generator failed: {0}")]
    Generator(E),
}

impl<E> ConvertError<E> {
    /// Returns the generator's error if this failure came from the generator.
    pub fn into_generator_error(self) -> Option<E> {
        match self {
            ConvertError::Generator(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the failure was detected from the arguments alone,
    /// before any entropy was read.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidOutputRange
                | ConvertError::InvalidInputRange
                | ConvertError::BufferTooSmall
                | ConvertError::RangeTooLarge
        )
    }
}

impl<E> ConvertError<ConvertError<E>> {
    /// Collapses the error of a converter whose generator is itself a
    /// converter.
    pub fn flatten(self) -> ConvertError<E> {
        match self {
            ConvertError::InvalidOutputRange => ConvertError::InvalidOutputRange,
            ConvertError::InvalidInputRange => ConvertError::InvalidInputRange,
            ConvertError::BufferTooSmall => ConvertError::BufferTooSmall,
            ConvertError::RangeTooLarge => ConvertError::RangeTooLarge,
            ConvertError::SourceOutOfRange => ConvertError::SourceOutOfRange,
            ConvertError::Generator(inner) => inner,
        }
    }
}
