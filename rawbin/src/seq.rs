//! Homogeneous sequences.
//!
//! A sequence is encoded as the plain concatenation of its elements. There is no length prefix,
//! so decoding needs the length out-of-band: either a [`Len`] context giving the element count,
//! or the unit context, which takes every remaining byte.

use crate::ctx::Len;
use crate::{ByteBuffer, Decode, Encode, Error, Reader, Scalar};

impl<T, Ctx> Encode<Ctx> for [T]
where
    T: Encode<Ctx>,
    Ctx: Clone,
{
    fn encode(&self, inner_ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error> {
        for elem in self {
            elem.encode(inner_ctx.clone(), buf)?;
        }
        Ok(())
    }
}

impl<T, Ctx> Encode<Ctx> for Vec<T>
where
    T: Encode<Ctx>,
    Ctx: Clone,
{
    fn encode(&self, inner_ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error> {
        self.as_slice().encode(inner_ctx, buf)
    }
}

/// Decodes exactly `len` elements.
///
/// The whole run is checked up front, so a short buffer fails before any element is read.
impl<T> Decode<Len> for Vec<T>
where
    T: Scalar,
{
    fn decode(Len(len): Len, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let remaining = reader.remaining();
        let needed = len
            .checked_mul(T::SIZE)
            .ok_or_else(|| Error::out_of_data(usize::MAX, remaining))?;
        if needed > remaining {
            return Err(Error::out_of_data(needed, remaining));
        }
        decode_elems(len, reader)
    }
}

/// Decodes every remaining byte.
///
/// Fails with [`Error::TrailingBytes`] if the remainder is not a whole number of elements.
impl<T> Decode for Vec<T>
where
    T: Scalar,
{
    fn decode(_ctx: (), reader: &mut Reader<'_>) -> Result<Self, Error> {
        if T::SIZE == 0 {
            return Ok(Self::new());
        }
        let remaining = reader.remaining();
        let trailing = remaining % T::SIZE;
        if trailing != 0 {
            return Err(Error::trailing_bytes(T::SIZE, trailing));
        }
        decode_elems(remaining / T::SIZE, reader)
    }
}

/// Decodes `len` elements, each under a clone of the inner context.
impl<T, Ctx> Decode<(Len, Ctx)> for Vec<T>
where
    T: Decode<Ctx>,
    Ctx: Clone,
{
    fn decode((Len(len), inner_ctx): (Len, Ctx), reader: &mut Reader<'_>) -> Result<Self, Error> {
        // Preallocate no more than the input could hold.
        let mut acc = Self::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            acc.push(T::decode(inner_ctx.clone(), reader)?);
        }
        Ok(acc)
    }
}

fn decode_elems<T>(len: usize, reader: &mut Reader<'_>) -> Result<Vec<T>, Error>
where
    T: Decode,
{
    let mut acc = Vec::with_capacity(len);
    for _ in 0..len {
        acc.push(T::decode((), reader)?);
    }
    Ok(acc)
}
