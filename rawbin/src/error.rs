use thiserror::Error;

/// Encoding and decoding errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A decode, peek or skip needed more bytes than the buffer holds.
    ///
    /// `needed` is the size of the whole read that failed, not the shortfall.
    #[error("out of data: needed {needed} bytes, {remaining} remaining")]
    OutOfData {
        /// Bytes required by the operation.
        needed: usize,
        /// Bytes that were available.
        remaining: usize,
    },

    /// A sequence decode without an element count found a partial element at the end.
    #[error("{trailing} trailing bytes do not form a whole {element_size}-byte element")]
    TrailingBytes {
        /// Encoded size of one element.
        element_size: usize,
        /// Bytes left over after the last whole element.
        trailing: usize,
    },

    /// Any other failure, raised by user or derived encoders and decoders.
    #[error("{message}")]
    Custom {
        /// Human-readable description.
        message: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl Error {
    /// Creates a new `Error` with the given message.
    pub fn new<S>(message: S) -> Self
    where
        S: ToString,
    {
        Self::Custom {
            message: message.to_string(),
            source: None,
        }
    }

    /// Creates a new `Error` with the given error value as the source.
    pub fn wrap<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates a new `Error` with a custom message and a source error value.
    pub fn with_context<S, E>(message: S, error: E) -> Self
    where
        S: ToString,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom {
            message: message.to_string(),
            source: Some(Box::new(error)),
        }
    }

    pub(crate) fn out_of_data(needed: usize, remaining: usize) -> Self {
        tracing::trace!(needed, remaining, "out of data");
        Self::OutOfData { needed, remaining }
    }

    pub(crate) fn trailing_bytes(element_size: usize, trailing: usize) -> Self {
        tracing::trace!(element_size, trailing, "partial trailing element");
        Self::TrailingBytes {
            element_size,
            trailing,
        }
    }

    /// Returns `true` if this is an [`Error::OutOfData`].
    pub fn is_out_of_data(&self) -> bool {
        matches!(self, Self::OutOfData { .. })
    }
}

macro_rules! convert_error {
    ($($t:ty,)*) => {$(
        impl From<$t> for Error {
            fn from(error: $t) -> Self {
                Self::wrap(error)
            }
        }
    )*}
}

convert_error! {
    std::convert::Infallible,
    std::array::TryFromSliceError,
    std::num::TryFromIntError,
}
