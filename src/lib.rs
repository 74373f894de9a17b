//! Byte-oriented character encoding conversion.
//!
//! This crate converts byte strings between character encodings through a
//! registry of direct transcoders. Each transcoder is a small conversion
//! program, either a byte-dispatch trie walked one input byte at a time or
//! a whole-stream scanner for escape-driven stateful encodings, and every
//! conversion runs to completion: the caller gets the fully converted
//! bytes or an error locating the first offending unit, never partial
//! output.
//!
//! # Example
//!
//! ```
//! use recode::{transcode, EncodedBytes};
//!
//! // Free-function form.
//! let utf8 = transcode(b"caf\xE9", "ISO-8859-1", "UTF-8").unwrap();
//! assert_eq!(utf8, "café".as_bytes());
//!
//! // Tagged form: the bytes carry their encoding name.
//! let s = EncodedBytes::new(utf8, "UTF-8");
//! let latin1 = s.encode(&["ISO-8859-1"]).unwrap();
//! assert_eq!(latin1.bytes(), b"caf\xE9");
//! ```

#![deny(missing_docs)]

/// Output buffer with the per-unit headroom growth protocol.
pub mod buffer;
/// Byte-dispatch trie nodes, actions, and the builder.
pub mod dispatch;
/// Byte strings tagged with their encoding.
pub mod encoded;
/// Error types for transcoding operations.
pub mod error;
/// The transcoder registry and conversion entry points.
pub mod registry;
/// Per-conversion state and output handling.
pub mod session;
/// Transcoder descriptors and program shapes.
pub mod transcoder;

mod engine;
mod utf8_shape;

/// Single-byte encodings paired with UTF-8.
#[cfg(feature = "single-byte")]
pub mod single_byte;

/// UTF-16 and UTF-32 transcoders.
#[cfg(feature = "unicode")]
pub mod utf_16_32;

/// ISO-2022-JP, EUC-JP, and the JIS X 0208 table.
#[cfg(feature = "japanese")]
pub mod japanese;
#[cfg(feature = "japanese")]
mod jis0208;

pub use encoded::EncodedBytes;
pub use error::TranscodeError;
pub use registry::{find, registry, transcode, transcode_in_place, TranscoderRegistry};
pub use transcoder::Transcoder;
