//! Host-order binary encoding of fixed-size values over a consumable byte buffer.
//!
//! Values are written as their raw host-native bytes, with no tags and no length prefixes, and
//! read back from the front of a [`ByteBuffer`]. The supported fixed-size types are the
//! [`Scalar`] types; sequences of them are concatenations whose length is supplied out-of-band
//! through a [`ctx::Len`] context, or implied by the end of the buffer.
//!
//! No byte swapping is done anywhere. Data produced on a little-endian host reads back correctly
//! only on a little-endian host.
//!
//! # Example
//!
//! ```
//! use rawbin::{ByteBuffer, Decode, Encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Samples {
//!     rate: f32,
//!     count: u16,
//!     #[rawbin(pad = 2)]
//!     stereo: bool,
//!     #[rawbin(count = "count")]
//!     values: Vec<i16>,
//! }
//!
//! let samples = Samples {
//!     rate: 44100.0,
//!     count: 3,
//!     stereo: false,
//!     values: vec![-1, 0, 1],
//! };
//!
//! let mut buf = ByteBuffer::new();
//! buf.encode(&samples).unwrap();
//! assert_eq!(buf.len(), 4 + 2 + 1 + 2 + 3 * 2);
//!
//! assert_eq!(buf.decode::<Samples>().unwrap(), samples);
//! assert!(buf.is_empty());
//! ```

#![warn(missing_docs)]

mod buffer;
pub mod ctx;
pub mod derive;
mod error;
mod macros;
mod reader;
mod scalar;
mod seq;

#[cfg(feature = "derive")]
pub use rawbin_derive::{Decode, Encode};

pub use self::buffer::ByteBuffer;
pub use self::error::Error;
pub use self::reader::Reader;
pub use self::scalar::Scalar;

/// A type that can be encoded onto the end of a byte buffer.
pub trait Encode<Ctx = ()> {
    /// Appends the encoding of `&self` to `buf`.
    fn encode(&self, ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error>;
}

/// A type that can be decoded from the front of a byte buffer.
pub trait Decode<Ctx = ()>: Sized {
    /// Decodes a value, consuming its bytes from `reader`.
    fn decode(ctx: Ctx, reader: &mut Reader<'_>) -> Result<Self, Error>;
}

impl<T, Ctx> Encode<Ctx> for &T
where
    T: Encode<Ctx> + ?Sized,
{
    fn encode(&self, ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error> {
        (*self).encode(ctx, buf)
    }
}

/// `None` encodes as nothing.
impl<T, Ctx> Encode<Ctx> for Option<T>
where
    T: Encode<Ctx>,
{
    fn encode(&self, inner_ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error> {
        match self {
            Some(inner) => inner.encode(inner_ctx, buf),
            None => Ok(()),
        }
    }
}

/// Always decodes the inner value and wraps it in `Some`.
///
/// An `Option` field cannot tell from the bytes alone whether it is present. To read one
/// conditionally, use [`ByteBuffer::decode_if`] or the `skip_if` derive attribute.
impl<T, Ctx> Decode<Ctx> for Option<T>
where
    T: Decode<Ctx>,
{
    fn decode(inner_ctx: Ctx, reader: &mut Reader<'_>) -> Result<Self, Error> {
        T::decode(inner_ctx, reader).map(Some)
    }
}
