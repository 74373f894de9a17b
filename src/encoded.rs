//! A byte string tagged with the name of its encoding.
//!
//! [`EncodedBytes`] carries the association between raw bytes and the
//! encoding they are meant to be read in, and exposes the variadic-style
//! conversion entry point: one argument names the destination, a second
//! optionally overrides the source, and any other count is rejected
//! before the registry is consulted.

use crate::error::TranscodeError;
use crate::registry;

/// Bytes together with the name of the encoding they are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBytes {
    bytes: Vec<u8>,
    encoding: String,
}

/// Validates the argument list of a conversion call.
///
/// Returns `(destination, source_override)`.
fn conversion_args<'a>(args: &[&'a str]) -> Result<(&'a str, Option<&'a str>), TranscodeError> {
    match args {
        [to] => Ok((to, None)),
        [to, from] => Ok((to, Some(from))),
        _ => Err(TranscodeError::WrongArgumentCount { given: args.len() }),
    }
}

impl EncodedBytes {
    /// Tags `bytes` with an encoding name. The bytes are not validated
    /// here; validation happens when they are converted.
    pub fn new(bytes: Vec<u8>, encoding: impl Into<String>) -> Self {
        Self {
            bytes,
            encoding: encoding.into(),
        }
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The encoding name these bytes are tagged with.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Consumes the value, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Converts to another encoding, returning a newly tagged value.
    ///
    /// `args` is `[destination]` or `[destination, source]`; the second
    /// form reinterprets the bytes as `source` regardless of the current
    /// tag. Any other argument count fails with
    /// [`TranscodeError::WrongArgumentCount`].
    pub fn encode(&self, args: &[&str]) -> Result<EncodedBytes, TranscodeError> {
        let (to, from) = conversion_args(args)?;
        let from = from.unwrap_or(&self.encoding);
        let bytes = registry::transcode(&self.bytes, from, to)?;
        Ok(EncodedBytes::new(bytes, to))
    }

    /// In-place variant of [`encode`](Self::encode): the bytes and the tag
    /// are replaced together, and only after full success.
    pub fn encode_in_place(&mut self, args: &[&str]) -> Result<(), TranscodeError> {
        let converted = self.encode(args)?;
        *self = converted;
        Ok(())
    }
}
