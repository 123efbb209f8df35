//! Types that give context to encoders and decoders.

use std::convert::{TryFrom, TryInto};
use std::num::TryFromIntError;

/// The number of elements in a sequence whose length is known out-of-band.
///
/// Passing `Len(n)` as the context of a `Vec<T>` decode consumes exactly `n` elements. Decoding
/// with the unit context instead consumes every remaining byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Len(pub usize);

impl From<usize> for Len {
    fn from(x: usize) -> Self {
        Len(x)
    }
}

impl From<&usize> for Len {
    fn from(&x: &usize) -> Self {
        Len(x)
    }
}

impl From<Len> for usize {
    fn from(Len(x): Len) -> Self {
        x
    }
}

macro_rules! convert_len {
    ($($t:ty)*) => {$(
        impl TryFrom<$t> for Len {
            type Error = TryFromIntError;

            fn try_from(x: $t) -> Result<Self, Self::Error> {
                Ok(Self(usize::try_from(x)?))
            }
        }

        // Derived `count` expressions see earlier fields by reference, and inference will not
        // deref `&T` to find `TryFrom<T>`.
        impl TryFrom<&$t> for Len {
            type Error = TryFromIntError;

            fn try_from(&x: &$t) -> Result<Self, Self::Error> {
                x.try_into()
            }
        }

        impl TryFrom<Len> for $t {
            type Error = TryFromIntError;

            fn try_from(Len(x): Len) -> Result<Self, Self::Error> {
                Self::try_from(x)
            }
        }
    )*};
}

convert_len! {
    u8 u16 u32 u64 u128 i8 i16 i32 i64 i128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_field_reference() {
        let count = 7u16;
        assert_eq!(Len::try_from(&count), Ok(Len(7)));
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(Len::try_from(-1i32).is_err());
    }

    #[test]
    fn narrowing_back_out() {
        assert_eq!(u8::try_from(Len(255)), Ok(255));
        assert!(u8::try_from(Len(256)).is_err());
    }
}
