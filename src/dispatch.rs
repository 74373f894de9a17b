//! Byte-dispatch trie: nodes, actions, and the builder that freezes them.
//!
//! A conversion program is a set of immutable [`DispatchNode`]s. Each node
//! maps a raw input byte to an [`Action`] through a 256-entry offset table
//! indexing a deduplicated slot table, so nodes whose byte classes share an
//! outcome store that outcome once. Nodes carry no mutable state and may be
//! referenced from multiple parents.
//!
//! Nodes are constructed once, at registry initialization, through a
//! [`TrieBuilder`]; they are never mutated afterwards.

use std::ops::RangeInclusive;

/// Up to four literal output bytes carried inline by an action.
///
/// This is the explicit tagged form of what the original engine packed
/// into pointer-sized integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes4 {
    len: u8,
    bytes: [u8; 4],
}

impl Bytes4 {
    /// One literal byte.
    pub const fn one(a: u8) -> Self {
        Self {
            len: 1,
            bytes: [a, 0, 0, 0],
        }
    }

    /// Two literal bytes.
    pub const fn two(a: u8, b: u8) -> Self {
        Self {
            len: 2,
            bytes: [a, b, 0, 0],
        }
    }

    /// Three literal bytes.
    pub const fn three(a: u8, b: u8, c: u8) -> Self {
        Self {
            len: 3,
            bytes: [a, b, c, 0],
        }
    }

    /// Four literal bytes.
    pub const fn four(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self {
            len: 4,
            bytes: [a, b, c, d],
        }
    }

    /// The literal bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of literal bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the literal is empty. Always false for constructed values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Reference to a node within one program's node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef(pub(crate) u16);

/// Selects which of the transcoder's bound function hooks a
/// [`Action::CallFunction`] action invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnSelector {
    /// The `shift_in` hook: units that move the session into a
    /// non-baseline character set (or, for stateless transcoders, the
    /// general unit-conversion function).
    ShiftIn,
    /// The `shift_out` hook: units that return the session to the
    /// baseline character set.
    ShiftOut,
}

/// The outcome of resolving one byte through a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit the consumed input bytes unchanged.
    CopyVerbatim,
    /// Emit exactly these bytes, discarding the consumed input.
    Literal(Bytes4),
    /// Consume, emit nothing.
    Drop,
    /// One more input byte is needed; continue at the child node.
    Descend(NodeRef),
    /// Invoke the bound function hook with the consumed bytes and the
    /// session state.
    CallFunction(FnSelector),
    /// The consumed bytes are not valid in the source encoding.
    Illegal,
    /// Valid in the source encoding, unrepresentable in the destination.
    Undefined,
}

/// An immutable node of the dispatch trie.
#[derive(Debug)]
pub struct DispatchNode {
    offsets: [u8; 256],
    actions: Box<[Action]>,
}

impl DispatchNode {
    /// Resolves one byte to its action.
    #[inline]
    pub fn action(&self, byte: u8) -> Action {
        self.actions[self.offsets[byte as usize] as usize]
    }
}

/// Builds a program's node set at registration time.
///
/// Nodes start with every byte mapped to [`Action::Illegal`]; callers
/// overwrite byte ranges and finally freeze the set into shared,
/// deduplicated [`DispatchNode`]s.
pub struct TrieBuilder {
    nodes: Vec<Box<[Action; 256]>>,
}

impl TrieBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node with every byte mapped to `Illegal`.
    pub fn node(&mut self) -> NodeRef {
        self.node_filled(Action::Illegal)
    }

    /// Adds a node with every byte mapped to `default`.
    pub fn node_filled(&mut self, default: Action) -> NodeRef {
        assert!(self.nodes.len() < u16::MAX as usize, "node set too large");
        self.nodes.push(Box::new([default; 256]));
        NodeRef((self.nodes.len() - 1) as u16)
    }

    /// Maps a single byte to an action.
    pub fn set(&mut self, node: NodeRef, byte: u8, action: Action) {
        self.nodes[node.0 as usize][byte as usize] = action;
    }

    /// Maps an inclusive byte range to an action.
    pub fn set_range(&mut self, node: NodeRef, range: RangeInclusive<u8>, action: Action) {
        for byte in range {
            self.nodes[node.0 as usize][byte as usize] = action;
        }
    }

    /// Freezes the builder into immutable nodes with deduplicated slots.
    ///
    /// Every `Descend` target must name a node created by this builder.
    pub fn freeze(self) -> Vec<DispatchNode> {
        let count = self.nodes.len();
        self.nodes
            .into_iter()
            .map(|table| {
                let mut offsets = [0u8; 256];
                let mut actions: Vec<Action> = Vec::new();
                for (byte, action) in table.iter().enumerate() {
                    if let Action::Descend(target) = action {
                        debug_assert!((target.0 as usize) < count, "dangling node reference");
                    }
                    let slot = match actions.iter().position(|a| a == action) {
                        Some(slot) => slot,
                        None => {
                            actions.push(*action);
                            actions.len() - 1
                        }
                    };
                    // At most 256 distinct actions per node, so the slot
                    // index always fits in the offset byte.
                    offsets[byte] = slot as u8;
                }
                DispatchNode {
                    offsets,
                    actions: actions.into_boxed_slice(),
                }
            })
            .collect()
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}
