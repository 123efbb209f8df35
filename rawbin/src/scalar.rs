//! The closed set of fixed-size types.

use crate::{ByteBuffer, Decode, Encode, Error, Reader};
use std::convert::TryInto;
use std::mem;
use uuid::Uuid;

mod sealed {
    pub trait Sealed {}
}

/// A value whose encoding is a constant number of bytes in host byte order.
///
/// This trait is sealed. It is implemented for the fixed-width integers, `f32`, `f64`, `bool`,
/// [`Uuid`], and arrays of any of these. Homogeneous sequences (`Vec<T>`, `[T]`) are built from
/// it.
pub trait Scalar: Encode + Decode + Copy + sealed::Sealed {
    /// Number of bytes in the encoding.
    const SIZE: usize;
}

macro_rules! impl_primitive {
    ($($t:ty)*) => {$(
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            const SIZE: usize = mem::size_of::<$t>();
        }

        impl Encode for $t {
            fn encode(&self, _ctx: (), buf: &mut ByteBuffer) -> Result<(), Error> {
                buf.put_slice(&self.to_ne_bytes());
                Ok(())
            }
        }

        impl Decode for $t {
            fn decode(_ctx: (), reader: &mut Reader<'_>) -> Result<Self, Error> {
                reader.take_array().map(Self::from_ne_bytes)
            }
        }
    )*}
}

impl_primitive! {
    u8 u16 u32 u64 u128 i8 i16 i32 i64 i128 f32 f64
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const SIZE: usize = 1;
}

/// Encodes as a single `0` or `1` byte.
impl Encode for bool {
    fn encode(&self, _ctx: (), buf: &mut ByteBuffer) -> Result<(), Error> {
        u8::from(*self).encode((), buf)
    }
}

/// Any non-zero byte decodes as `true`.
impl Decode for bool {
    fn decode(_ctx: (), reader: &mut Reader<'_>) -> Result<Self, Error> {
        u8::decode((), reader).map(|byte| byte != 0)
    }
}

impl sealed::Sealed for Uuid {}

impl Scalar for Uuid {
    const SIZE: usize = 16;
}

/// Encodes the 16 bytes in the order `Uuid::as_bytes` stores them.
impl Encode for Uuid {
    fn encode(&self, _ctx: (), buf: &mut ByteBuffer) -> Result<(), Error> {
        buf.put_slice(self.as_bytes());
        Ok(())
    }
}

impl Decode for Uuid {
    fn decode(_ctx: (), reader: &mut Reader<'_>) -> Result<Self, Error> {
        reader.take_array().map(Uuid::from_bytes)
    }
}

impl<T, const N: usize> sealed::Sealed for [T; N] where T: Scalar {}

impl<T, const N: usize> Scalar for [T; N]
where
    T: Scalar,
{
    const SIZE: usize = T::SIZE * N;
}

impl<T, Ctx, const N: usize> Encode<Ctx> for [T; N]
where
    T: Encode<Ctx>,
    Ctx: Clone,
{
    fn encode(&self, ctx: Ctx, buf: &mut ByteBuffer) -> Result<(), Error> {
        self.as_slice().encode(ctx, buf)
    }
}

impl<T, Ctx, const N: usize> Decode<Ctx> for [T; N]
where
    T: Decode<Ctx>,
    Ctx: Clone,
{
    fn decode(ctx: Ctx, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut elems = Vec::with_capacity(N);
        for _ in 0..N {
            elems.push(T::decode(ctx.clone(), reader)?);
        }
        elems
            .try_into()
            .map_err(|_| Error::new("array length mismatch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip<T>(value: T) -> (T, ByteBuffer)
    where
        T: Scalar,
    {
        let mut buf = ByteBuffer::new();
        buf.encode(&value).unwrap();
        assert_eq!(buf.len(), T::SIZE);
        let encoded = buf.clone();
        let decoded = buf.decode::<T>().unwrap();
        assert!(buf.is_empty());
        (decoded, encoded)
    }

    #[test]
    fn sizes() {
        assert_eq!(u8::SIZE, 1);
        assert_eq!(i16::SIZE, 2);
        assert_eq!(f32::SIZE, 4);
        assert_eq!(u64::SIZE, 8);
        assert_eq!(i128::SIZE, 16);
        assert_eq!(bool::SIZE, 1);
        assert_eq!(Uuid::SIZE, 16);
        assert_eq!(<[u32; 3]>::SIZE, 12);
        assert_eq!(<[[u16; 2]; 2]>::SIZE, 8);
    }

    #[test]
    fn host_order_u32() {
        let (decoded, encoded) = roundtrip(0x0102_0304u32);
        assert_eq!(decoded, 0x0102_0304);
        #[cfg(target_endian = "little")]
        assert_eq!(encoded.as_slice(), &[0x04, 0x03, 0x02, 0x01]);
        #[cfg(target_endian = "big")]
        assert_eq!(encoded.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn bool_bytes() {
        let (_, encoded) = roundtrip(true);
        assert_eq!(encoded.as_slice(), &[1]);
        let (_, encoded) = roundtrip(false);
        assert_eq!(encoded.as_slice(), &[0]);

        let mut buf = ByteBuffer::from(vec![0x7f]);
        assert!(buf.decode::<bool>().unwrap());
    }

    #[test]
    fn uuid_keeps_byte_order() {
        let id = Uuid::from_bytes([
            0x67, 0xe5, 0x50, 0x44, 0x10, 0xb1, 0x42, 0x6f, 0x92, 0x47, 0xbb, 0x68, 0x0e, 0x5f,
            0xe0, 0xc8,
        ]);
        let (decoded, encoded) = roundtrip(id);
        assert_eq!(decoded, id);
        assert_eq!(encoded.as_slice(), id.as_bytes());
    }

    #[test]
    fn nan_payload_survives() {
        let nan = f64::from_bits(0x7ff8_dead_beef_0001);
        let (decoded, _) = roundtrip(nan);
        assert_eq!(decoded.to_bits(), nan.to_bits());
    }

    #[test]
    fn array_is_concatenation() {
        let (decoded, encoded) = roundtrip([1u16, 2, 3]);
        assert_eq!(decoded, [1, 2, 3]);
        let mut expected = Vec::new();
        for x in &[1u16, 2, 3] {
            expected.extend_from_slice(&x.to_ne_bytes());
        }
        assert_eq!(encoded.as_slice(), expected.as_slice());
    }

    #[test]
    fn short_input_is_an_error_for_every_width() {
        fn check<T: Scalar + std::fmt::Debug>() {
            let mut buf = ByteBuffer::from(vec![0xab; T::SIZE - 1]);
            match buf.decode::<T>() {
                Err(Error::OutOfData { needed, remaining }) => {
                    assert_eq!(needed, T::SIZE);
                    assert_eq!(remaining, T::SIZE - 1);
                }
                other => panic!("unexpected {:?}", other),
            }
            assert!(buf.peek::<T>().is_err());
            assert_eq!(buf.len(), T::SIZE - 1);
        }
        check::<u8>();
        check::<i16>();
        check::<u32>();
        check::<f32>();
        check::<i64>();
        check::<f64>();
        check::<u128>();
        check::<bool>();
        check::<Uuid>();
    }

    proptest! {
        #[test]
        fn roundtrip_u16(v in any::<u16>()) {
            prop_assert_eq!(roundtrip(v).0, v);
        }

        #[test]
        fn roundtrip_i32(v in any::<i32>()) {
            prop_assert_eq!(roundtrip(v).0, v);
        }

        #[test]
        fn roundtrip_u64(v in any::<u64>()) {
            prop_assert_eq!(roundtrip(v).0, v);
        }

        #[test]
        fn roundtrip_i8(v in any::<i8>()) {
            prop_assert_eq!(roundtrip(v).0, v);
        }

        #[test]
        fn roundtrip_f32_bits(bits in any::<u32>()) {
            let v = f32::from_bits(bits);
            prop_assert_eq!(roundtrip(v).0.to_bits(), bits);
        }

        #[test]
        fn roundtrip_f64_bits(bits in any::<u64>()) {
            let v = f64::from_bits(bits);
            prop_assert_eq!(roundtrip(v).0.to_bits(), bits);
        }

        #[test]
        fn roundtrip_uuid(bytes in any::<[u8; 16]>()) {
            let v = Uuid::from_bytes(bytes);
            prop_assert_eq!(roundtrip(v).0, v);
        }

        #[test]
        fn decode_matches_earlier_peek(bytes in prop::collection::vec(any::<u8>(), 8..32)) {
            let mut buf = ByteBuffer::from(bytes.clone());
            let peeked = buf.peek::<u64>().unwrap();
            prop_assert_eq!(buf.as_slice(), bytes.as_slice());
            let decoded = buf.decode::<u64>().unwrap();
            prop_assert_eq!(peeked, decoded);
            prop_assert_eq!(buf.len(), bytes.len() - 8);
        }
    }
}
