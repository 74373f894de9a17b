//! UTF-16 and UTF-32 transcoders, big and little endian, each paired with
//! UTF-8 in both directions.
//!
//! The tries here only check structure: code unit boundaries, surrogate
//! pairing, and the U+10FFFF ceiling. The arithmetic of a validated unit
//! happens in function hooks, which receive the complete consumed unit and
//! re-emit it in the destination form.

use crate::dispatch::{Action, Bytes4, FnSelector, TrieBuilder};
use crate::error::UnitError;
use crate::registry::Registration;
use crate::session::State;
use crate::transcoder::{Emitted, Hooks, Transcoder, UnitFn};
use crate::utf8_shape::{code_point, install_utf8_multibyte};

fn push_utf8(cp: u32, out: &mut Emitted) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x10000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
}

/// Splits a code point into one or two UTF-16 code units.
fn utf16_code_units(cp: u32) -> ([u16; 2], usize) {
    if cp < 0x10000 {
        ([cp as u16, 0], 1)
    } else {
        let v = cp - 0x10000;
        ([0xD800 | (v >> 10) as u16, 0xDC00 | (v & 0x3FF) as u16], 2)
    }
}

// Decoder hooks. The trie has already established that the unit is a
// complete BMP code unit or a correctly ordered surrogate pair.

fn utf16be_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let cp = if unit.len() == 2 {
        ((unit[0] as u32) << 8) | unit[1] as u32
    } else {
        let hi = ((unit[0] as u32) << 8) | unit[1] as u32;
        let lo = ((unit[2] as u32) << 8) | unit[3] as u32;
        0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
    };
    let mut out = Emitted::new();
    push_utf8(cp, &mut out);
    Ok(out)
}

fn utf16le_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let cp = if unit.len() == 2 {
        ((unit[1] as u32) << 8) | unit[0] as u32
    } else {
        let hi = ((unit[1] as u32) << 8) | unit[0] as u32;
        let lo = ((unit[3] as u32) << 8) | unit[2] as u32;
        0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
    };
    let mut out = Emitted::new();
    push_utf8(cp, &mut out);
    Ok(out)
}

fn utf32be_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let cp = u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]]);
    let mut out = Emitted::new();
    push_utf8(cp, &mut out);
    Ok(out)
}

fn utf32le_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let cp = u32::from_le_bytes([unit[0], unit[1], unit[2], unit[3]]);
    let mut out = Emitted::new();
    push_utf8(cp, &mut out);
    Ok(out)
}

// Encoder hooks, fed complete structure-checked UTF-8 units.

fn to_utf16be_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let (units, count) = utf16_code_units(code_point(unit));
    let mut out = Emitted::new();
    for u in &units[..count] {
        out.push((u >> 8) as u8);
        out.push(*u as u8);
    }
    Ok(out)
}

fn to_utf16le_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let (units, count) = utf16_code_units(code_point(unit));
    let mut out = Emitted::new();
    for u in &units[..count] {
        out.push(*u as u8);
        out.push((u >> 8) as u8);
    }
    Ok(out)
}

fn to_utf32be_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let mut out = Emitted::new();
    out.extend(&code_point(unit).to_be_bytes());
    Ok(out)
}

fn to_utf32le_unit(_state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let mut out = Emitted::new();
    out.extend(&code_point(unit).to_le_bytes());
    Ok(out)
}

fn utf16_decoder(from: &'static str, unit: UnitFn, big_endian: bool) -> Transcoder {
    let call = Action::CallFunction(FnSelector::ShiftIn);
    let mut b = TrieBuilder::new();
    let root = b.node();
    if big_endian {
        // The first byte of a unit is the high byte and decides its class.
        let bmp_tail = b.node_filled(call);
        b.set_range(root, 0x00..=0xD7, Action::Descend(bmp_tail));
        b.set_range(root, 0xE0..=0xFF, Action::Descend(bmp_tail));

        let pair_tail = b.node_filled(call);
        let low_lead = b.node();
        b.set_range(low_lead, 0xDC..=0xDF, Action::Descend(pair_tail));
        let high_tail = b.node_filled(Action::Descend(low_lead));
        b.set_range(root, 0xD8..=0xDB, Action::Descend(high_tail));
        // 0xDC..=0xDF: unpaired low surrogate, root default Illegal.
    } else {
        // The second byte of a unit is the high byte; the first is opaque.
        let second = b.node();
        b.set_range(root, 0x00..=0xFF, Action::Descend(second));
        b.set_range(second, 0x00..=0xD7, call);
        b.set_range(second, 0xE0..=0xFF, call);

        let fourth = b.node();
        b.set_range(fourth, 0xDC..=0xDF, call);
        let third = b.node_filled(Action::Descend(fourth));
        b.set_range(second, 0xD8..=0xDB, Action::Descend(third));
    }
    Transcoder::table(
        from,
        "UTF-8",
        b,
        root,
        4,
        false,
        Hooks {
            shift_in: Some(unit),
            ..Hooks::default()
        },
    )
}

fn utf32_decoder(from: &'static str, unit: UnitFn, big_endian: bool) -> Transcoder {
    let call = Action::CallFunction(FnSelector::ShiftIn);
    let mut b = TrieBuilder::new();
    let root = b.node();
    if big_endian {
        let tail = b.node_filled(call);
        let third_any = b.node_filled(Action::Descend(tail));

        // Plane 0 needs the surrogate gap carved out of the third byte.
        let third_bmp = b.node_filled(Action::Descend(tail));
        b.set_range(third_bmp, 0xD8..=0xDF, Action::Illegal);

        let second = b.node();
        b.set(second, 0x00, Action::Descend(third_bmp));
        b.set_range(second, 0x01..=0x10, Action::Descend(third_any));
        b.set(root, 0x00, Action::Descend(second));
    } else {
        // Bytes arrive lowest first; the constraints sit on bytes 2..4.
        let fourth = b.node();
        b.set(fourth, 0x00, call);
        let third = b.node();
        b.set_range(third, 0x00..=0x10, Action::Descend(fourth));

        // A surrogate-range second byte is only legal outside plane 0.
        let third_surr = b.node();
        b.set_range(third_surr, 0x01..=0x10, Action::Descend(fourth));

        let second = b.node_filled(Action::Descend(third));
        b.set_range(second, 0xD8..=0xDF, Action::Descend(third_surr));
        b.set_range(root, 0x00..=0xFF, Action::Descend(second));
    }
    Transcoder::table(
        from,
        "UTF-8",
        b,
        root,
        4,
        false,
        Hooks {
            shift_in: Some(unit),
            ..Hooks::default()
        },
    )
}

fn utf8_encoder(to: &'static str, unit: UnitFn, ascii: fn(u8) -> Bytes4) -> Transcoder {
    let call = Action::CallFunction(FnSelector::ShiftIn);
    let mut b = TrieBuilder::new();
    let root = b.node();
    for byte in 0x00..=0x7Fu8 {
        b.set(root, byte, Action::Literal(ascii(byte)));
    }
    install_utf8_multibyte(&mut b, root, |_, _| call, call, call);
    Transcoder::table(
        "UTF-8",
        to,
        b,
        root,
        4,
        true,
        Hooks {
            shift_in: Some(unit),
            ..Hooks::default()
        },
    )
}

fn ascii_16be(byte: u8) -> Bytes4 {
    Bytes4::two(0, byte)
}

fn ascii_16le(byte: u8) -> Bytes4 {
    Bytes4::two(byte, 0)
}

fn ascii_32be(byte: u8) -> Bytes4 {
    Bytes4::four(0, 0, 0, byte)
}

fn ascii_32le(byte: u8) -> Bytes4 {
    Bytes4::four(byte, 0, 0, 0)
}

macro_rules! unicode_transcoders {
    ($($ident:ident => $build:expr;)*) => {
        paste::paste! {
            $(
                fn [<build_ $ident>]() -> Transcoder {
                    $build
                }

                inventory::submit! {
                    Registration { build: [<build_ $ident>] }
                }
            )*
        }
    };
}

unicode_transcoders! {
    utf16be_decoder => utf16_decoder("UTF-16BE", utf16be_unit, true);
    utf16le_decoder => utf16_decoder("UTF-16LE", utf16le_unit, false);
    utf32be_decoder => utf32_decoder("UTF-32BE", utf32be_unit, true);
    utf32le_decoder => utf32_decoder("UTF-32LE", utf32le_unit, false);
    utf16be_encoder => utf8_encoder("UTF-16BE", to_utf16be_unit, ascii_16be);
    utf16le_encoder => utf8_encoder("UTF-16LE", to_utf16le_unit, ascii_16le);
    utf32be_encoder => utf8_encoder("UTF-32BE", to_utf32be_unit, ascii_32be);
    utf32le_encoder => utf8_encoder("UTF-32LE", to_utf32le_unit, ascii_32le);
}
