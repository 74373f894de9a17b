//! Error types for transcoding operations.
//!
//! Every failure unwinds out of the conversion call; nothing is recovered
//! locally and no partially converted output is ever visible to the caller.
//! The public taxonomy is [`TranscodeError`]; the crate-internal types
//! `UnitError` and `Interrupt` let hook functions and stream programs
//! report failures without knowing which encoding pair they serve; the
//! registry decorates them with both names before they reach the caller.

use thiserror::Error;

/// An error produced by a transcoding operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// No direct transcoder is registered for the requested pair.
    ///
    /// Recoverable by the caller: a different destination may be available.
    /// Conversion through an intermediate encoding is never attempted.
    #[error("transcoding not supported between {from} and {to}")]
    UnsupportedPair {
        /// The requested source encoding name, as given by the caller.
        from: String,
        /// The requested destination encoding name, as given by the caller.
        to: String,
    },

    /// The input contains bytes that are not valid in the source encoding.
    #[error("illegal byte sequence at offset {offset} while converting {from} to {to}")]
    IllegalSequence {
        /// The source encoding name.
        from: String,
        /// The destination encoding name.
        to: String,
        /// Byte offset of the start of the offending unit.
        offset: usize,
    },

    /// The input is valid in the source encoding but the unit starting at
    /// `offset` has no representation in the destination encoding.
    #[error("sequence at offset {offset} is valid in {from} but undefined in {to}")]
    UndefinedMapping {
        /// The source encoding name.
        from: String,
        /// The destination encoding name.
        to: String,
        /// Byte offset of the start of the unmappable unit.
        offset: usize,
    },

    /// A structurally recognized but intentionally unimplemented construct,
    /// such as an ISO-2022 shift control byte.
    #[error("unsupported {feature} at offset {offset} while converting {from} to {to}")]
    UnsupportedFeature {
        /// The source encoding name.
        from: String,
        /// The destination encoding name.
        to: String,
        /// Byte offset of the construct.
        offset: usize,
        /// Short description of the construct, e.g. `"shift control byte"`.
        feature: &'static str,
    },

    /// Fewer input bytes were consumed than were supplied. Any leftover
    /// input after a full-buffer conversion is itself an error.
    #[error("conversion from {from} to {to} consumed only {consumed} of {total} bytes")]
    IncompleteConversion {
        /// The source encoding name.
        from: String,
        /// The destination encoding name.
        to: String,
        /// Number of input bytes that were consumed.
        consumed: usize,
        /// Number of input bytes that were supplied.
        total: usize,
    },

    /// The consumer-facing conversion call accepts one argument
    /// (destination) or two (destination, source); anything else is
    /// rejected without touching the registry.
    #[error("wrong number of arguments (given {given}, expected 1..=2)")]
    WrongArgumentCount {
        /// The number of arguments that were given.
        given: usize,
    },
}

/// Failure reported by a unit function hook.
///
/// Hooks see one consumed unit and the session state; they do not know the
/// encoding names or the absolute input offset. Unsupported constructs are
/// recognized structurally, before any hook runs, so the only failure a
/// hook can report is an unmappable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitError {
    /// The unit is valid in the source encoding but cannot be expressed
    /// in the destination.
    Undefined,
}

/// Failure raised inside the engine, carrying the offset of the offending
/// unit but not yet the encoding pair names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Illegal(usize),
    Undefined(usize),
    Unsupported(usize, &'static str),
    Incomplete { consumed: usize },
}

impl UnitError {
    /// Attach the input offset of the unit that triggered this failure.
    pub(crate) fn at(self, offset: usize) -> Interrupt {
        match self {
            UnitError::Undefined => Interrupt::Undefined(offset),
        }
    }
}

impl Interrupt {
    /// Decorate with the encoding pair to form the caller-visible error.
    pub(crate) fn into_error(self, from: &str, to: &str, total: usize) -> TranscodeError {
        let from = from.to_string();
        let to = to.to_string();
        match self {
            Interrupt::Illegal(offset) => TranscodeError::IllegalSequence { from, to, offset },
            Interrupt::Undefined(offset) => TranscodeError::UndefinedMapping { from, to, offset },
            Interrupt::Unsupported(offset, feature) => TranscodeError::UnsupportedFeature {
                from,
                to,
                offset,
                feature,
            },
            Interrupt::Incomplete { consumed } => TranscodeError::IncompleteConversion {
                from,
                to,
                consumed,
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_endpoints() {
        let err = TranscodeError::UnsupportedPair {
            from: "Shift_JIS".into(),
            to: "KOI8-R".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Shift_JIS"));
        assert!(msg.contains("KOI8-R"));
    }

    #[test]
    fn interrupt_decoration() {
        let err = Interrupt::Undefined(7).into_error("UTF-8", "ISO-8859-1", 10);
        assert_eq!(
            err,
            TranscodeError::UndefinedMapping {
                from: "UTF-8".into(),
                to: "ISO-8859-1".into(),
                offset: 7,
            }
        );

        let err = Interrupt::Unsupported(4, "shift control byte")
            .into_error("ISO-2022-JP", "EUC-JP", 8);
        assert_eq!(
            err,
            TranscodeError::UnsupportedFeature {
                from: "ISO-2022-JP".into(),
                to: "EUC-JP".into(),
                offset: 4,
                feature: "shift control byte",
            }
        );

        let err = Interrupt::Incomplete { consumed: 3 }.into_error("a", "b", 9);
        assert_eq!(
            err,
            TranscodeError::IncompleteConversion {
                from: "a".into(),
                to: "b".into(),
                consumed: 3,
                total: 9,
            }
        );
    }
}
