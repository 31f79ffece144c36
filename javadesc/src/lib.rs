//! Crate for decoding JVM method descriptors.
//!
//! A method descriptor like `(I[Ljava/lang/String;)V` is decoded into a [`MethodSignature`], which holds the
//! [`Type`]s of the parameters and the return type. See [`decode`] for the entry point.
//!
//! Decoding is pure: there's no state kept between calls, and the same input always produces the same output.

mod descriptor;

pub use descriptor::{decode, decode_type, DecodeError, DecodeErrorKind, MethodSignature, Primitive, Type, MAX_ARRAY_DIMENSIONS};
