//! The decode-side cursor.

use crate::Error;

/// A forward-only cursor over borrowed bytes.
///
/// Every [`Decode`](crate::Decode) implementation pulls its input from a `Reader`. The
/// [`ByteBuffer`](crate::ByteBuffer) hands one out over its current contents and only drops the
/// bytes it covered once the whole value decoded, so a failed decode consumes nothing and a peek
/// is simply a decode whose position is thrown away.
///
/// # Example
///
/// ```
/// use rawbin::Reader;
///
/// let mut reader = Reader::new(&[1, 2, 3]);
/// assert_eq!(reader.take(2).unwrap(), &[1, 2]);
/// assert_eq!(reader.position(), 2);
/// assert!(reader.take(2).unwrap_err().is_out_of_data());
/// assert_eq!(reader.remaining(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Returns `true` if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unconsumed bytes, without consuming them.
    pub fn as_slice(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }

    /// Consumes exactly `count` bytes.
    ///
    /// Fails with [`Error::OutOfData`] and consumes nothing if fewer remain.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8], Error> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(Error::out_of_data(count, remaining));
        }
        let start = self.position;
        self.position += count;
        Ok(&self.bytes[start..self.position])
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Consumes `count` bytes without interpreting them.
    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        self.take(count).map(drop)
    }

    /// Consumes and returns everything that is left.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.as_slice();
        self.position = self.bytes.len();
        rest
    }
}
