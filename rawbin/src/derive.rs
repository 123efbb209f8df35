//! Derive macros.
//!
//! **Note:** The macros themselves are not contained in this module; they are at the top level of
//! the crate. This module is used to document them.
//!
//! The `Encode` and `Decode` macros generate implementations of their respective traits for
//! structs. Each field is encoded or decoded in the order it is declared, directly after the
//! previous one, with no alignment padding unless a `pad` attribute asks for it. Enums are not
//! supported; a flat record has no tag to pick a variant from.
//!
//! Because a derived `Decode` reads through the same [`Reader`](crate::Reader) as everything else,
//! a record that fails halfway leaves the [`ByteBuffer`](crate::ByteBuffer) untouched.
//!
//! # Attributes
//!
//! The implementation can be modified by attributes at two levels:
//!
//! - **Container** attributes are applied to the outside of the struct.
//! - **Field** attributes are prepended to the field declaration.
//!
//! Some attributes can be _asymmetric_, meaning different values may be specified for `Encode` and
//! `Decode`. To do this, instead of providing a single value like `#[rawbin(name = "value")]`, the
//! syntax `#[rawbin(name(encode = "value1", decode = "value2"))]` will also work. Either of the
//! `encode` or `decode` values may be omitted, and the default will be used, as if the attribute
//! is not present.
//!
//! ## Attribute Expressions
//!
//! Some attributes accept values in the form of _expressions_. These should be provided
//! as a string literal (surrounded by quotes), and they have access to the context bindings
//! defined in the container-level `ctx` attribute, as well as the values (by reference) of any of
//! the fields declared _before_ the attribute. Field values can be accessed by the field's name,
//! or by `field_0`, `field_1`, etc. in a tuple struct. The try operator `?` may be used, provided
//! the error type converts into a [`rawbin::Error`](crate::Error).
//!
//! The classic example is an integer field giving the element count of a later `Vec`:
//!
//! ```
//! use rawbin::{ByteBuffer, Decode, Encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Points {
//!     len: u16,
//!     #[rawbin(count = "len")]
//!     xs: Vec<f32>,
//!     #[rawbin(count = "len")]
//!     ys: Vec<f32>,
//! }
//!
//! let points = Points { len: 2, xs: vec![0.5, 1.5], ys: vec![-1.0, 2.0] };
//! let mut buf = ByteBuffer::new();
//! buf.encode(&points).unwrap();
//! assert_eq!(buf.len(), 2 + 4 * 4);
//! assert_eq!(buf.decode::<Points>().unwrap(), points);
//! ```
//!
//! ## Container Attributes
//!
//! - **`crate_path`** - Specify a custom path to the `rawbin` crate. If you use the `rawbin` crate
//! under a different name, this must be set to that path for the `derive` to successfully compile.
//!
//! - **`ctx`** (Asymmetric) - A comma-separated list of context fields, specified by `$ident:
//! $type` (e.g. `len: usize`). The `Ctx` type parameter of the resulting `Encode` or `Decode`
//! impl will be a _n_-tuple of the given types if n > 1, or the given type itself if n = 1, and
//! the context values will be bound to the given `ident`s to be used in attribute expressions.
//! When not present, the context type is the unit type `()`. Example:
//!
//! ```
//! use rawbin::{ByteBuffer, Decode, Encode};
//! use rawbin::ctx::Len;
//!
//! /// The sample count lives in some header decoded earlier.
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! #[rawbin(ctx(decode = "samples: usize"))]
//! struct Block {
//!     #[rawbin(ctx(decode = "Len(samples)"))]
//!     values: Vec<i32>,
//!     checksum: u8,
//! }
//!
//! let block = Block { values: vec![1, 2, 3], checksum: 0x5a };
//! let mut buf = ByteBuffer::new();
//! buf.encode(&block).unwrap();
//! assert_eq!(buf.decode_with::<Block, _>(3).unwrap(), block);
//! ```
//!
//! ## Field Attributes
//!
//! - **`ctx`** (Asymmetric) The context value to be passed to the field's encoder or decoder. When
//! not present, the passed context is the unit context.
//!
//! - **`count`** - An expression giving the number of elements of a sequence field. When decoding,
//! it is converted to a [`Len`](crate::ctx::Len) context; any integer type (or reference to one)
//! is accepted, and a negative or oversized value is an error. Conflicts with a decode `ctx`.
//!
//! - **`with`** (Conflicts with `encode_with` and `decode_with`) - Uses the given helper functions
//! to encode or decode the field instead of the field type's `Encode` or `Decode` implementation.
//! Should be a path to a module with these definitions:
//!
//! ```
//! # type T = ();
//! # type Ctx = ();
//! fn encode(val: &T, ctx: Ctx, buf: &mut rawbin::ByteBuffer) -> Result<(), rawbin::Error> {
//! # todo!()
//!     /* ... */
//! }
//!
//! fn decode(ctx: Ctx, reader: &mut rawbin::Reader<'_>) -> Result<T, rawbin::Error> {
//! # todo!()
//!     /* ... */
//! }
//! ```
//!
//! where `T` is the field type and `Ctx` is the type of the context provided by `ctx` (or the
//! unit type `()` if not specified).
//!
//! - **`encode_with`** (Conflicts with `with`) - Uses the given helper function to encode the field
//! instead of the field type's `Encode` implementation, with the signature of `encode` above.
//!
//! - **`decode_with`** (Conflicts with `with`) - Uses the given helper function to decode the field
//! instead of the field type's `Decode` implementation, with the signature of `decode` above.
//!
//! - **`skip_if`** - If the given expression evaluates true, the field will not be encoded or
//! decoded. When decoding, the field will be given the value of `Default::default()` instead.
//!
//!   This is the way to express a field that may be absent. `Option::decode` on its own always
//!   reads the inner value:
//!
//! ```
//! use rawbin::{ByteBuffer, Decode, Encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct OptionalExtraData {
//!     tag: u8,
//!     #[rawbin(skip_if = "*tag != 2")]
//!     extra_data: Option<u32>,
//! }
//!
//! let mut buf = ByteBuffer::from(vec![1]);
//! let value = buf.decode::<OptionalExtraData>().unwrap();
//! assert_eq!(value, OptionalExtraData { tag: 1, extra_data: None });
//! ```
//!
//! - **`pad`** - A number of zero bytes written after the field, and skipped after it when
//! decoding. Padding belongs to its field, so it is left out along with a field whose `skip_if`
//! holds.
