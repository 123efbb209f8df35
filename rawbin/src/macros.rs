/// Encodes each value into a [`ByteBuffer`](crate::ByteBuffer) in argument order.
///
/// Expands to a `Result<(), rawbin::Error>` that stops at the first failing value. The values
/// may be of different types; each needs an [`Encode`](crate::Encode) impl for the unit context.
///
/// # Example
///
/// ```
/// use rawbin::{encode, ByteBuffer};
///
/// let mut buf = ByteBuffer::new();
/// encode!(buf; 1u8, 2u16, [3u8, 4], vec![5u8]).unwrap();
/// assert_eq!(buf.len(), 1 + 2 + 2 + 1);
/// assert_eq!(buf.decode::<u8>().unwrap(), 1);
/// assert_eq!(buf.decode::<u16>().unwrap(), 2);
/// assert_eq!(buf.decode::<Vec<u8>>().unwrap(), [3, 4, 5]);
/// ```
#[macro_export]
macro_rules! encode {
    ($buf:expr; $($value:expr),* $(,)?) => {
        (|| -> ::std::result::Result<(), $crate::Error> {
            let buf: &mut $crate::ByteBuffer = &mut $buf;
            $( $crate::Encode::encode(&$value, (), &mut *buf)?; )*
            Ok(())
        })()
    };
}
