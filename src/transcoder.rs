//! Transcoder descriptors and their conversion programs.
//!
//! A [`Transcoder`] is an immutable, registration-time descriptor of one
//! directed conversion. Its program takes one of two shapes, unified by the
//! same session contract (reserve headroom, write, report failure):
//!
//! - a **table** program: a dispatch-node walk, optionally calling bound
//!   function hooks for units that need arithmetic or accumulated mode;
//! - a **stream** program: a whole-stream scanner for encodings whose mode
//!   changes are driven by escape sequences arbitrarily far from the bytes
//!   they affect.

use crate::dispatch::{Action, DispatchNode, FnSelector, NodeRef, TrieBuilder};
use crate::error::{Interrupt, UnitError};
use crate::session::{State, TranscodingSession};

/// Worst-case bytes a single function hook invocation may emit.
pub(crate) const EMIT_MAX: usize = 8;

/// Small fixed buffer returned by function hooks: the bytes to emit for
/// one consumed unit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Emitted {
    len: u8,
    bytes: [u8; EMIT_MAX],
}

impl Emitted {
    /// An empty emission.
    pub(crate) fn new() -> Self {
        Self {
            len: 0,
            bytes: [0; EMIT_MAX],
        }
    }

    /// Appends one byte.
    pub(crate) fn push(&mut self, byte: u8) {
        assert!((self.len as usize) < EMIT_MAX, "unit emitted too many bytes");
        self.bytes[self.len as usize] = byte;
        self.len += 1;
    }

    /// Appends a slice.
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.push(*b);
        }
    }

    /// The emitted bytes.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// A function hook bound to `CallFunction` actions: receives the consumed
/// unit and the session state, returns the bytes to emit.
pub(crate) type UnitFn = fn(&mut State, &[u8]) -> Result<Emitted, UnitError>;

/// The end-of-stream hook: runs once after the last unit, e.g. to flush a
/// stateful encoding back to its baseline character set.
pub(crate) type FinishFn = fn(&mut State) -> Result<Emitted, UnitError>;

/// A whole-stream program: scans the input itself, writes through the
/// session's growth protocol, and returns the number of bytes consumed.
pub(crate) type StreamFn = fn(&[u8], &mut TranscodingSession) -> Result<usize, Interrupt>;

/// Optional function hooks of a transcoder.
#[derive(Default, Clone, Copy)]
pub(crate) struct Hooks {
    /// Bound to `CallFunction(ShiftIn)` actions.
    pub(crate) shift_in: Option<UnitFn>,
    /// Bound to `CallFunction(ShiftOut)` actions.
    pub(crate) shift_out: Option<UnitFn>,
    /// End-of-stream flush.
    pub(crate) finish: Option<FinishFn>,
}

/// The conversion program strategy.
pub(crate) enum Program {
    /// Dispatch-node walk from a root node.
    Table {
        /// All nodes of this program; `Descend` references index into it.
        nodes: Vec<DispatchNode>,
        /// Where each unit's walk begins.
        root: NodeRef,
    },
    /// Whole-stream scanner.
    Stream(StreamFn),
}

/// An immutable descriptor of one directed encoding-to-encoding conversion.
///
/// Created once during registry initialization and owned by the registry
/// for the process lifetime.
pub struct Transcoder {
    from: &'static str,
    to: &'static str,
    pub(crate) program: Program,
    max_output: usize,
    source_is_utf8: bool,
    pub(crate) hooks: Hooks,
}

impl Transcoder {
    /// Builds a table-program transcoder, freezing the builder's nodes.
    ///
    /// Panics on registration-time defects: a literal longer than
    /// `max_output`, or a `CallFunction` action whose hook is absent.
    /// These indicate a broken transcoder definition, not a runtime
    /// condition.
    pub(crate) fn table(
        from: &'static str,
        to: &'static str,
        builder: TrieBuilder,
        root: NodeRef,
        max_output: usize,
        source_is_utf8: bool,
        hooks: Hooks,
    ) -> Self {
        assert!(max_output <= EMIT_MAX);
        let nodes = builder.freeze();
        for node in &nodes {
            for byte in 0..=0xFFu8 {
                match node.action(byte) {
                    Action::Literal(bytes) => {
                        assert!(
                            bytes.len() <= max_output,
                            "{} -> {}: literal exceeds max_output",
                            from,
                            to
                        );
                    }
                    Action::CallFunction(FnSelector::ShiftIn) => {
                        assert!(hooks.shift_in.is_some(), "{} -> {}: missing shift_in", from, to);
                    }
                    Action::CallFunction(FnSelector::ShiftOut) => {
                        assert!(hooks.shift_out.is_some(), "{} -> {}: missing shift_out", from, to);
                    }
                    _ => {}
                }
            }
        }
        Self {
            from,
            to,
            program: Program::Table { nodes, root },
            max_output,
            source_is_utf8,
            hooks,
        }
    }

    /// Builds a stream-program transcoder.
    pub(crate) fn stream(
        from: &'static str,
        to: &'static str,
        run: StreamFn,
        max_output: usize,
        source_is_utf8: bool,
        hooks: Hooks,
    ) -> Self {
        assert!(max_output <= EMIT_MAX);
        Self {
            from,
            to,
            program: Program::Stream(run),
            max_output,
            source_is_utf8,
            hooks,
        }
    }

    /// The source encoding name.
    pub fn from_name(&self) -> &'static str {
        self.from
    }

    /// The destination encoding name.
    pub fn to_name(&self) -> &'static str {
        self.to
    }

    /// Maximum output bytes one unit of this conversion can produce.
    pub fn max_output(&self) -> usize {
        self.max_output
    }

    /// Whether the source encoding is UTF-8.
    pub fn source_is_utf8(&self) -> bool {
        self.source_is_utf8
    }
}
