//! The owned byte buffer that values are encoded into and decoded out of.

use crate::ctx::Len;
use crate::{Decode, Encode, Error, Reader, Scalar};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::ops::Deref;

/// A growable byte buffer, consumed from the front and appended to at the back.
///
/// The front of the buffer is always the next byte to decode; encoding always appends. Decoding
/// a value either succeeds and drops exactly the bytes the value occupied, or fails and leaves the
/// buffer as it was.
///
/// # Example
///
/// ```
/// use rawbin::ByteBuffer;
///
/// let mut buf = ByteBuffer::new();
/// buf.encode(&0x0102_0304u32).unwrap();
/// buf.encode(&true).unwrap();
/// buf.pad(3);
///
/// assert_eq!(buf.len(), 8);
/// assert_eq!(buf.peek::<u32>().unwrap(), 0x0102_0304);
/// assert_eq!(buf.decode::<u32>().unwrap(), 0x0102_0304);
/// assert!(buf.decode::<bool>().unwrap());
/// buf.skip(3).unwrap();
/// assert!(buf.is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ByteBuffer {
    bytes: BytesMut,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes left in the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if no bytes are left.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The buffer contents, front first.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Discards all contents.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Unwraps the underlying `BytesMut`.
    pub fn into_inner(self) -> BytesMut {
        self.bytes
    }

    /// Converts the contents into immutable `Bytes`.
    pub fn freeze(self) -> Bytes {
        self.bytes.freeze()
    }

    /// Appends raw bytes. This is the primitive that encoders write with.
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the encoding of `value`.
    pub fn encode<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Encode + ?Sized,
    {
        value.encode((), self)
    }

    /// Appends the encoding of `value` under the given context.
    pub fn encode_with<T, Ctx>(&mut self, value: &T, ctx: Ctx) -> Result<(), Error>
    where
        T: Encode<Ctx> + ?Sized,
    {
        value.encode(ctx, self)
    }

    /// Appends the encodings of `values` in order.
    ///
    /// See also the [`encode!`](crate::encode!) macro, which does not need the `&dyn` coercion.
    pub fn encode_many(&mut self, values: &[&dyn Encode]) -> Result<(), Error> {
        for value in values {
            value.encode((), self)?;
        }
        Ok(())
    }

    /// Decodes a value from the front of the buffer and removes its bytes.
    pub fn decode<T>(&mut self) -> Result<T, Error>
    where
        T: Decode,
    {
        self.decode_with(())
    }

    /// Decodes a value under the given context and removes its bytes.
    pub fn decode_with<T, Ctx>(&mut self, ctx: Ctx) -> Result<T, Error>
    where
        T: Decode<Ctx>,
    {
        let mut reader = Reader::new(&self.bytes);
        let value = T::decode(ctx, &mut reader)?;
        let consumed = reader.position();
        self.bytes.advance(consumed);
        Ok(value)
    }

    /// Decodes a value from the front of the buffer without removing anything.
    pub fn peek<T>(&self) -> Result<T, Error>
    where
        T: Decode,
    {
        self.peek_with(())
    }

    /// Decodes a value under the given context without removing anything.
    pub fn peek_with<T, Ctx>(&self, ctx: Ctx) -> Result<T, Error>
    where
        T: Decode<Ctx>,
    {
        T::decode(ctx, &mut Reader::new(&self.bytes))
    }

    /// Decodes a value of the target's type and overwrites the target.
    ///
    /// On failure the target and the buffer are left unchanged.
    ///
    /// ```
    /// use rawbin::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::from(&[7u8, 0, 0, 0, 1, 2][..]);
    /// let mut id = 0u32;
    /// let mut flag: Option<u8> = None;
    /// let mut tail: Vec<u8> = Vec::new();
    ///
    /// buf.decode_into(&mut id).unwrap();
    /// buf.decode_into(&mut flag).unwrap();
    /// buf.decode_into(&mut tail).unwrap();
    ///
    /// assert_eq!(id, u32::from_ne_bytes([7, 0, 0, 0]));
    /// assert_eq!(flag, Some(1));
    /// assert_eq!(tail, [2]);
    /// assert!(buf.is_empty());
    /// ```
    pub fn decode_into<T>(&mut self, target: &mut T) -> Result<(), Error>
    where
        T: Decode,
    {
        self.decode_into_with(target, ())
    }

    /// Like [`decode_into`](Self::decode_into), under the given context.
    pub fn decode_into_with<T, Ctx>(&mut self, target: &mut T, ctx: Ctx) -> Result<(), Error>
    where
        T: Decode<Ctx>,
    {
        *target = self.decode_with(ctx)?;
        Ok(())
    }

    /// Like [`decode_into`](Self::decode_into), but leaves the buffer unchanged.
    pub fn peek_into<T>(&self, target: &mut T) -> Result<(), Error>
    where
        T: Decode,
    {
        self.peek_into_with(target, ())
    }

    /// Like [`peek_into`](Self::peek_into), under the given context.
    pub fn peek_into_with<T, Ctx>(&self, target: &mut T, ctx: Ctx) -> Result<(), Error>
    where
        T: Decode<Ctx>,
    {
        *target = self.peek_with(ctx)?;
        Ok(())
    }

    /// Decodes a homogeneous sequence.
    ///
    /// With `Some(count)`, exactly `count` elements are consumed. With `None`, the whole
    /// remaining buffer is consumed, and it must hold a whole number of elements.
    ///
    /// ```
    /// use rawbin::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::new();
    /// buf.encode(&[1u16, 2, 3][..]).unwrap();
    ///
    /// assert_eq!(buf.decode_seq::<u16>(Some(2)).unwrap(), [1, 2]);
    /// assert_eq!(buf.len(), 2);
    /// assert_eq!(buf.decode_seq::<u16>(None).unwrap(), [3]);
    /// assert!(buf.is_empty());
    /// ```
    pub fn decode_seq<T>(&mut self, count: Option<usize>) -> Result<Vec<T>, Error>
    where
        T: Scalar,
    {
        match count {
            Some(count) => self.decode_with(Len(count)),
            None => self.decode(),
        }
    }

    /// Decodes a value only if `present` is true.
    ///
    /// When `present` is false nothing is consumed and `None` is returned. This is the way to
    /// express fields that may be absent; decoding an `Option<T>` directly always reads a `T`.
    pub fn decode_if<T>(&mut self, present: bool) -> Result<Option<T>, Error>
    where
        T: Decode,
    {
        if present {
            self.decode().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Appends `count` zero bytes.
    pub fn pad(&mut self, count: usize) {
        self.bytes.put_bytes(0, count);
    }

    /// Appends one zero byte.
    pub fn pad_one(&mut self) {
        self.pad(1);
    }

    /// Removes `count` bytes from the front without interpreting them.
    ///
    /// Fails with [`Error::OutOfData`] and removes nothing if fewer than `count` remain.
    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        let remaining = self.bytes.len();
        if count > remaining {
            return Err(Error::out_of_data(count, remaining));
        }
        self.bytes.advance(count);
        Ok(())
    }

    /// Removes one byte from the front.
    pub fn skip_one(&mut self) -> Result<(), Error> {
        self.skip(1)
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<BytesMut> for ByteBuffer {
    fn from(bytes: BytesMut) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: BytesMut::from(bytes),
        }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        bytes.as_slice().into()
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.bytes.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_decode_consumes_nothing() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        let error = buf.decode::<u32>().unwrap_err();
        assert!(error.is_out_of_data());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn failed_decode_into_keeps_target() {
        let mut buf = ByteBuffer::from(vec![1]);
        let mut target = 0xdead_u16;
        assert!(buf.decode_into(&mut target).is_err());
        assert_eq!(target, 0xdead);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn peek_into_does_not_consume() {
        let mut buf = ByteBuffer::new();
        buf.encode(&-5i16).unwrap();
        let mut target = 0i16;
        buf.peek_into(&mut target).unwrap();
        assert_eq!(target, -5);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn encode_many_in_argument_order() {
        let mut buf = ByteBuffer::new();
        buf.encode_many(&[&1u8, &2u16, &vec![3u8, 4]]).unwrap();
        let mut expected = vec![1];
        expected.extend_from_slice(&2u16.to_ne_bytes());
        expected.extend_from_slice(&[3, 4]);
        assert_eq!(buf.as_slice(), expected.as_slice());
    }

    #[test]
    fn pad_writes_zeros() {
        let mut buf = ByteBuffer::from(vec![0xff]);
        buf.pad(4);
        buf.pad_one();
        assert_eq!(buf.as_slice(), &[0xff, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn pad_then_skip_is_empty() {
        let mut buf = ByteBuffer::new();
        buf.pad(9);
        buf.skip(8).unwrap();
        buf.skip_one().unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn short_skip_removes_nothing() {
        let mut buf = ByteBuffer::from(vec![1, 2]);
        match buf.skip(3) {
            Err(Error::OutOfData { needed, remaining }) => {
                assert_eq!((needed, remaining), (3, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn decode_if_absent_consumes_nothing() {
        let mut buf = ByteBuffer::from(vec![1, 0]);
        assert_eq!(buf.decode_if::<u8>(false).unwrap(), None);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.decode_if::<u8>(true).unwrap(), Some(1));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn freeze_keeps_unconsumed_bytes() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        buf.skip_one().unwrap();
        assert_eq!(&buf.clone().freeze()[..], &[2, 3]);
        assert_eq!(Vec::from(buf), vec![2, 3]);
    }
}
