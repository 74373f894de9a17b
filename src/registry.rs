//! Process-wide transcoder registry and the conversion entry points.
//!
//! Transcoder families register themselves with `inventory::submit!`; the
//! submissions are collected exactly once, on first use, into a hash-keyed
//! map. After that single-threaded build the registry is read-only, so
//! concurrent lookups and conversions need no locking.
//!
//! Lookup is a case-insensitive exact match on the `(from, to)` name pair.
//! No transcoding chains are attempted: either a direct converter exists
//! or the pair is unsupported.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::engine;
use crate::error::TranscodeError;
use crate::transcoder::Transcoder;

/// A boot-time transcoder submission.
///
/// Each transcoder family submits one of these per supported pair via
/// `inventory::submit!`; the builder runs once, during registry
/// initialization.
pub struct Registration {
    /// Builds the transcoder. Runs exactly once.
    pub build: fn() -> Transcoder,
}

inventory::collect!(Registration);

/// The process-wide table of registered transcoders.
pub struct TranscoderRegistry {
    map: HashMap<(String, String), Transcoder>,
}

impl TranscoderRegistry {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Inserts a transcoder, keyed case-insensitively by its name pair.
    ///
    /// Panics if the pair is already registered: a duplicate is a build
    /// defect, not a runtime condition. The map is dynamically sized, so
    /// registration has no capacity ceiling.
    pub fn register(&mut self, transcoder: Transcoder) {
        let key = (
            transcoder.from_name().to_ascii_lowercase(),
            transcoder.to_name().to_ascii_lowercase(),
        );
        debug!(
            from = transcoder.from_name(),
            to = transcoder.to_name(),
            max_output = transcoder.max_output(),
            source_is_utf8 = transcoder.source_is_utf8(),
            "registered transcoder"
        );
        if self.map.insert(key, transcoder).is_some() {
            panic!("duplicate transcoder registration");
        }
    }

    /// Case-insensitive exact lookup of a direct transcoder. Pure: no
    /// chaining, no fallback, no side effects.
    pub fn find(&self, from: &str, to: &str) -> Option<&Transcoder> {
        self.map
            .get(&(from.to_ascii_lowercase(), to.to_ascii_lowercase()))
    }

    /// Number of registered transcoders.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the registered `(from, to)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.map.values().map(|t| (t.from_name(), t.to_name()))
    }
}

static REGISTRY: LazyLock<TranscoderRegistry> = LazyLock::new(|| {
    let mut registry = TranscoderRegistry::new();
    for registration in inventory::iter::<Registration> {
        registry.register((registration.build)());
    }
    registry
});

/// The process-wide registry, built on first use.
pub fn registry() -> &'static TranscoderRegistry {
    &REGISTRY
}

/// Finds the direct transcoder for a pair, if one is registered.
pub fn find(from: &str, to: &str) -> Option<&'static Transcoder> {
    registry().find(from, to)
}

/// Converts `input` from one encoding to another.
///
/// If the names match case-insensitively the input is returned as a copy
/// without consulting the registry. Otherwise the registered transcoder
/// runs to completion; on failure the error names the pair and, where
/// applicable, the offending byte offset, and no partial output exists.
///
/// # Example
///
/// ```
/// let out = recode::transcode(b"caf\xE9", "ISO-8859-1", "UTF-8").unwrap();
/// assert_eq!(out, "café".as_bytes());
/// ```
pub fn transcode(input: &[u8], from: &str, to: &str) -> Result<Vec<u8>, TranscodeError> {
    if from.eq_ignore_ascii_case(to) {
        return Ok(input.to_vec());
    }
    let Some(transcoder) = registry().find(from, to) else {
        debug!(from, to, "no direct transcoder registered");
        return Err(TranscodeError::UnsupportedPair {
            from: from.to_string(),
            to: to.to_string(),
        });
    };
    engine::run(transcoder, input)
        .map_err(|i| i.into_error(transcoder.from_name(), transcoder.to_name(), input.len()))
}

/// In-place variant of [`transcode`]: replaces the caller's storage with
/// the converted bytes only after full success. On failure the original
/// content is untouched.
pub fn transcode_in_place(bytes: &mut Vec<u8>, from: &str, to: &str) -> Result<(), TranscodeError> {
    if from.eq_ignore_ascii_case(to) {
        return Ok(());
    }
    let converted = transcode(bytes, from, to)?;
    *bytes = converted;
    Ok(())
}
