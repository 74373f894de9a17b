//! Shared UTF-8 structural trie fragments.
//!
//! Every transcoder whose source is UTF-8 walks the same well-formedness
//! structure: lead-byte classes, the constrained continuation ranges of
//! the E0/ED/F0/F4 rows, and plain 80..=BF continuations elsewhere. This
//! helper installs that structure once; callers choose what happens at the
//! leaves (a literal, a function call, or an undefined mapping). Malformed
//! structure always resolves to the node default, `Illegal`.

use crate::dispatch::{Action, NodeRef, TrieBuilder};

/// Installs the multi-byte half of the UTF-8 structure on `root`.
///
/// `two_byte` supplies the leaf action for each valid `(lead, trail)` of a
/// two-byte sequence; `three_byte` and `four_byte` are the uniform leaf
/// actions for complete longer sequences. The ASCII range of `root` is the
/// caller's business.
pub(crate) fn install_utf8_multibyte(
    b: &mut TrieBuilder,
    root: NodeRef,
    mut two_byte: impl FnMut(u8, u8) -> Action,
    three_byte: Action,
    four_byte: Action,
) {
    // Final continuation of a three-byte sequence.
    let tail3 = b.node();
    b.set_range(tail3, 0x80..=0xBF, three_byte);

    // Middle byte of a three-byte sequence, by lead class.
    let mid_e0 = b.node();
    b.set_range(mid_e0, 0xA0..=0xBF, Action::Descend(tail3));
    let mid_ed = b.node();
    b.set_range(mid_ed, 0x80..=0x9F, Action::Descend(tail3));
    let mid3 = b.node();
    b.set_range(mid3, 0x80..=0xBF, Action::Descend(tail3));

    // Four-byte sequences: two trailing continuations after the mid byte.
    let tail4 = b.node();
    b.set_range(tail4, 0x80..=0xBF, four_byte);
    let mid4 = b.node();
    b.set_range(mid4, 0x80..=0xBF, Action::Descend(tail4));
    let mid_f0 = b.node();
    b.set_range(mid_f0, 0x90..=0xBF, Action::Descend(mid4));
    let mid_f4 = b.node();
    b.set_range(mid_f4, 0x80..=0x8F, Action::Descend(mid4));
    let mid4_plain = b.node();
    b.set_range(mid4_plain, 0x80..=0xBF, Action::Descend(mid4));

    for lead in 0xC2..=0xDFu8 {
        let row = b.node();
        for trail in 0x80..=0xBFu8 {
            b.set(row, trail, two_byte(lead, trail));
        }
        b.set(root, lead, Action::Descend(row));
    }

    b.set(root, 0xE0, Action::Descend(mid_e0));
    b.set_range(root, 0xE1..=0xEC, Action::Descend(mid3));
    b.set(root, 0xED, Action::Descend(mid_ed));
    b.set_range(root, 0xEE..=0xEF, Action::Descend(mid3));
    b.set(root, 0xF0, Action::Descend(mid_f0));
    b.set_range(root, 0xF1..=0xF3, Action::Descend(mid4_plain));
    b.set(root, 0xF4, Action::Descend(mid_f4));
    // 0x80..=0xC1 and 0xF5..=0xFF keep the root default: Illegal.
}

/// Decodes the code point of one complete, structure-checked UTF-8 unit.
pub(crate) fn code_point(unit: &[u8]) -> u32 {
    match unit.len() {
        1 => unit[0] as u32,
        2 => (((unit[0] & 0x1F) as u32) << 6) | (unit[1] & 0x3F) as u32,
        3 => {
            (((unit[0] & 0x0F) as u32) << 12)
                | (((unit[1] & 0x3F) as u32) << 6)
                | (unit[2] & 0x3F) as u32
        }
        4 => {
            (((unit[0] & 0x07) as u32) << 18)
                | (((unit[1] & 0x3F) as u32) << 12)
                | (((unit[2] & 0x3F) as u32) << 6)
                | (unit[3] & 0x3F) as u32
        }
        _ => unreachable!("UTF-8 units are one to four bytes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Bytes4;
    use crate::engine;
    use crate::error::Interrupt;
    use crate::transcoder::{Hooks, Transcoder};

    /// Marks each valid sequence length with one output byte, so structure
    /// checks are observable through the engine.
    fn marker_transcoder() -> Transcoder {
        let mut b = TrieBuilder::new();
        let root = b.node();
        b.set_range(root, 0x00..=0x7F, Action::Literal(Bytes4::one(1)));
        install_utf8_multibyte(
            &mut b,
            root,
            |_, _| Action::Literal(Bytes4::one(2)),
            Action::Literal(Bytes4::one(3)),
            Action::Literal(Bytes4::one(4)),
        );
        Transcoder::table("UTF-8", "marker", b, root, 1, true, Hooks::default())
    }

    #[test]
    fn accepts_well_formed_sequences() {
        let t = marker_transcoder();
        let input = "Aé€\u{10348}".as_bytes();
        assert_eq!(engine::run(&t, input).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejects_surrogates_and_overlongs() {
        let t = marker_transcoder();
        // CESU-style surrogate half.
        assert_eq!(
            engine::run(&t, &[0xED, 0xA0, 0x80]),
            Err(Interrupt::Illegal(0))
        );
        // Overlong two-byte encoding of '/'.
        assert_eq!(
            engine::run(&t, &[0xC0, 0xAF]),
            Err(Interrupt::Illegal(0))
        );
        // Beyond U+10FFFF.
        assert_eq!(
            engine::run(&t, &[0xF4, 0x90, 0x80, 0x80]),
            Err(Interrupt::Illegal(0))
        );
    }

    #[test]
    fn rejects_bare_continuation() {
        let t = marker_transcoder();
        assert_eq!(engine::run(&t, &[0x80]), Err(Interrupt::Illegal(0)));
    }

    #[test]
    fn code_point_math() {
        assert_eq!(code_point(b"A"), 0x41);
        assert_eq!(code_point(&[0xC3, 0xA9]), 0xE9);
        assert_eq!(code_point(&[0xE3, 0x81, 0x82]), 0x3042);
        assert_eq!(code_point(&[0xF0, 0x90, 0x8D, 0x88]), 0x10348);
    }
}
