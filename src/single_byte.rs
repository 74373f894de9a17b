//! Single-byte encodings: ISO-8859-1, ISO-8859-9, and US-ASCII, each paired
//! with UTF-8 in both directions.
//!
//! These transcoders are pure table programs with no function hooks. The
//! byte-to-Unicode map of each encoding is a plain function; the decode
//! direction turns it into per-byte literal actions and the encode
//! direction inverts it under the shared UTF-8 structure trie.

use crate::dispatch::{Action, Bytes4, TrieBuilder};
use crate::registry::Registration;
use crate::transcoder::{Hooks, Transcoder};
use crate::utf8_shape::install_utf8_multibyte;

/// Unicode code point of one byte of a single-byte encoding, or `None`
/// when the byte is not part of the encoding.
type ByteMap = fn(u8) -> Option<u16>;

fn latin1(byte: u8) -> Option<u16> {
    Some(byte as u16)
}

fn latin5(byte: u8) -> Option<u16> {
    // ISO-8859-9 replaces six Latin-1 positions with Turkish letters.
    Some(match byte {
        0xD0 => 0x011E, // Ğ
        0xDD => 0x0130, // İ
        0xDE => 0x015E, // Ş
        0xF0 => 0x011F, // ğ
        0xFD => 0x0131, // ı
        0xFE => 0x015F, // ş
        _ => byte as u16,
    })
}

fn ascii(byte: u8) -> Option<u16> {
    (byte < 0x80).then_some(byte as u16)
}

/// Encodes a BMP code point below U+0800 as UTF-8 literal bytes.
fn utf8_literal(cp: u16) -> Bytes4 {
    debug_assert!(cp < 0x800);
    if cp < 0x80 {
        Bytes4::one(cp as u8)
    } else {
        Bytes4::two(0xC0 | (cp >> 6) as u8, 0x80 | (cp & 0x3F) as u8)
    }
}

fn decoder(from: &'static str, map: ByteMap) -> Transcoder {
    let mut b = TrieBuilder::new();
    let root = b.node();
    for byte in 0..=0xFFu8 {
        let action = match map(byte) {
            Some(cp) if cp == byte as u16 && byte < 0x80 => Action::CopyVerbatim,
            Some(cp) => Action::Literal(utf8_literal(cp)),
            // Bytes outside the encoding are illegal input, not an
            // unmappable character.
            None => Action::Illegal,
        };
        b.set(root, byte, action);
    }
    Transcoder::table(from, "UTF-8", b, root, 2, false, Hooks::default())
}

fn encoder(to: &'static str, map: ByteMap) -> Transcoder {
    // Invert the byte map. All three encodings live below U+0800, so the
    // reverse table covers exactly the one- and two-byte UTF-8 range.
    let mut reverse = [None::<u8>; 0x800];
    for byte in 0..=0xFFu8 {
        if let Some(cp) = map(byte) {
            reverse[cp as usize] = Some(byte);
        }
    }

    let mut b = TrieBuilder::new();
    let root = b.node();
    for cp in 0..0x80usize {
        let action = match reverse[cp] {
            Some(byte) if byte as usize == cp => Action::CopyVerbatim,
            Some(byte) => Action::Literal(Bytes4::one(byte)),
            None => Action::Undefined,
        };
        b.set(root, cp as u8, action);
    }
    install_utf8_multibyte(
        &mut b,
        root,
        |lead, trail| {
            let cp = (((lead & 0x1F) as usize) << 6) | (trail & 0x3F) as usize;
            match reverse[cp] {
                Some(byte) => Action::Literal(Bytes4::one(byte)),
                None => Action::Undefined,
            }
        },
        Action::Undefined,
        Action::Undefined,
    );
    Transcoder::table("UTF-8", to, b, root, 1, true, Hooks::default())
}

macro_rules! single_byte_pair {
    ($($ident:ident => $name:literal, $map:path;)*) => {
        paste::paste! {
            $(
                fn [<$ident _decoder>]() -> Transcoder {
                    decoder($name, $map)
                }

                fn [<$ident _encoder>]() -> Transcoder {
                    encoder($name, $map)
                }

                inventory::submit! {
                    Registration { build: [<$ident _decoder>] }
                }

                inventory::submit! {
                    Registration { build: [<$ident _encoder>] }
                }
            )*
        }
    };
}

single_byte_pair! {
    iso_8859_1 => "ISO-8859-1", latin1;
    iso_8859_9 => "ISO-8859-9", latin5;
    us_ascii => "US-ASCII", ascii;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use crate::error::Interrupt;

    #[test]
    fn latin1_high_byte_expands() {
        let t = decoder("ISO-8859-1", latin1);
        assert_eq!(engine::run(&t, &[0x41, 0xE9]).unwrap(), b"A\xC3\xA9");
    }

    #[test]
    fn latin1_round_trips_every_byte() {
        let dec = decoder("ISO-8859-1", latin1);
        let enc = encoder("ISO-8859-1", latin1);
        let all: Vec<u8> = (0..=0xFF).collect();
        let utf8 = engine::run(&dec, &all).unwrap();
        assert_eq!(engine::run(&enc, &utf8).unwrap(), all);
    }

    #[test]
    fn latin5_turkish_overrides() {
        let dec = decoder("ISO-8859-9", latin5);
        // ĞİŞğış
        assert_eq!(
            engine::run(&dec, &[0xD0, 0xDD, 0xDE, 0xF0, 0xFD, 0xFE]).unwrap(),
            "ĞİŞğış".as_bytes()
        );

        let enc = encoder("ISO-8859-9", latin5);
        assert_eq!(
            engine::run(&enc, "İstanbul".as_bytes()).unwrap(),
            &[0xDD, 0x73, 0x74, 0x61, 0x6E, 0x62, 0x75, 0x6C]
        );
    }

    #[test]
    fn latin5_rejects_displaced_latin1_letters() {
        // U+00D0 (Ð) has no slot in ISO-8859-9; its byte went to Ğ.
        let enc = encoder("ISO-8859-9", latin5);
        assert_eq!(
            engine::run(&enc, "Ð".as_bytes()),
            Err(Interrupt::Undefined(0))
        );
    }

    #[test]
    fn ascii_high_byte_is_illegal_on_decode() {
        let t = decoder("US-ASCII", ascii);
        assert_eq!(engine::run(&t, &[0x41, 0x80]), Err(Interrupt::Illegal(1)));
    }

    #[test]
    fn ascii_unmappable_on_encode() {
        let t = encoder("US-ASCII", ascii);
        assert_eq!(
            engine::run(&t, "abé".as_bytes()),
            Err(Interrupt::Undefined(2))
        );
    }

    #[test]
    fn malformed_utf8_is_illegal_not_undefined() {
        let t = encoder("ISO-8859-1", latin1);
        assert_eq!(engine::run(&t, &[0xC3]), Err(Interrupt::Illegal(0)));
        assert_eq!(engine::run(&t, &[0xC3, 0x41]), Err(Interrupt::Illegal(0)));
    }
}
