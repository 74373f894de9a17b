//! Japanese encodings: ISO-2022-JP paired with EUC-JP and with UTF-8.
//!
//! ISO-2022-JP is the one stateful encoding here. Decoding it uses a
//! stream program, because an escape sequence changes the meaning of every
//! byte after it. Encoding into it uses table programs whose function
//! hooks track the currently designated character set in the session state
//! and emit designation escapes on transitions; the `finish` hook shifts a
//! non-ASCII stream back to ASCII before the output is sealed.

use crate::dispatch::{Action, FnSelector, TrieBuilder};
use crate::error::{Interrupt, UnitError};
use crate::jis0208;
use crate::registry::Registration;
use crate::session::{State, TranscodingSession, STATE_MODE};
use crate::transcoder::{Emitted, Hooks, Transcoder};
use crate::utf8_shape::{code_point, install_utf8_multibyte};

// Designation escapes of the character sets this crate converts.
const ESC_ASCII: &[u8] = b"\x1B(B";
const ESC_KATAKANA: &[u8] = b"\x1B(I";
const ESC_JIS0208: &[u8] = b"\x1B$B";
const ESC_JIS0212: &[u8] = b"\x1B$(D";

// Encoder-side designation modes, kept in the session state.
const MODE_ASCII: u8 = 0;
const MODE_JIS0208: u8 = 1;
const MODE_KATAKANA: u8 = 2;
const MODE_JIS0212: u8 = 3;

fn designate(state: &mut State, mode: u8, escape: &[u8], out: &mut Emitted) {
    if state[STATE_MODE] != mode {
        out.extend(escape);
        state[STATE_MODE] = mode;
    }
}

/// ASCII bytes of either encoder: return to ASCII designation first.
fn jis_ascii_unit(state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let mut out = Emitted::new();
    designate(state, MODE_ASCII, ESC_ASCII, &mut out);
    out.push(unit[0]);
    Ok(out)
}

/// Multi-byte EUC-JP units: the lead byte picks the character set.
fn euc_jis_unit(state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let mut out = Emitted::new();
    match unit[0] {
        0x8E => {
            designate(state, MODE_KATAKANA, ESC_KATAKANA, &mut out);
            out.push(unit[1] & 0x7F);
        }
        0x8F => {
            designate(state, MODE_JIS0212, ESC_JIS0212, &mut out);
            out.push(unit[1] & 0x7F);
            out.push(unit[2] & 0x7F);
        }
        _ => {
            designate(state, MODE_JIS0208, ESC_JIS0208, &mut out);
            out.push(unit[0] & 0x7F);
            out.push(unit[1] & 0x7F);
        }
    }
    Ok(out)
}

/// Multi-byte UTF-8 units, looked up in the JIS X 0208 table.
fn utf8_jis_unit(state: &mut State, unit: &[u8]) -> Result<Emitted, UnitError> {
    let Some(ch) = char::from_u32(code_point(unit)) else {
        return Err(UnitError::Undefined);
    };
    let Some(code) = jis0208::encode(ch) else {
        return Err(UnitError::Undefined);
    };
    let mut out = Emitted::new();
    designate(state, MODE_JIS0208, ESC_JIS0208, &mut out);
    out.push((code >> 8) as u8);
    out.push(code as u8);
    Ok(out)
}

/// Shifts the stream back to ASCII at end of input.
fn jis_finish(state: &mut State) -> Result<Emitted, UnitError> {
    let mut out = Emitted::new();
    designate(state, MODE_ASCII, ESC_ASCII, &mut out);
    Ok(out)
}

fn euc_jp_encoder() -> Transcoder {
    let mut b = TrieBuilder::new();
    let root = b.node();
    b.set_range(root, 0x00..=0x7F, Action::CallFunction(FnSelector::ShiftOut));
    // Controls that would collide with the destination's own state
    // machinery have no safe representation.
    b.set(root, 0x0E, Action::Undefined);
    b.set(root, 0x0F, Action::Undefined);
    b.set(root, 0x1B, Action::Undefined);

    let call = Action::CallFunction(FnSelector::ShiftIn);
    let kana = b.node();
    b.set_range(kana, 0xA1..=0xDF, call);
    b.set(root, 0x8E, Action::Descend(kana));

    let pair_tail = b.node();
    b.set_range(pair_tail, 0xA1..=0xFE, call);
    b.set_range(root, 0xA1..=0xFE, Action::Descend(pair_tail));

    let p0212_tail = b.node();
    b.set_range(p0212_tail, 0xA1..=0xFE, call);
    let p0212_mid = b.node();
    b.set_range(p0212_mid, 0xA1..=0xFE, Action::Descend(p0212_tail));
    b.set(root, 0x8F, Action::Descend(p0212_mid));

    Transcoder::table(
        "EUC-JP",
        "ISO-2022-JP",
        b,
        root,
        6,
        false,
        Hooks {
            shift_in: Some(euc_jis_unit),
            shift_out: Some(jis_ascii_unit),
            finish: Some(jis_finish),
        },
    )
}

fn utf8_encoder() -> Transcoder {
    let mut b = TrieBuilder::new();
    let root = b.node();
    b.set_range(root, 0x00..=0x7F, Action::CallFunction(FnSelector::ShiftOut));
    b.set(root, 0x0E, Action::Undefined);
    b.set(root, 0x0F, Action::Undefined);
    b.set(root, 0x1B, Action::Undefined);

    let call = Action::CallFunction(FnSelector::ShiftIn);
    // Astral characters are well formed but outside every JIS plane.
    install_utf8_multibyte(&mut b, root, |_, _| call, call, Action::Undefined);

    Transcoder::table(
        "UTF-8",
        "ISO-2022-JP",
        b,
        root,
        5,
        true,
        Hooks {
            shift_in: Some(utf8_jis_unit),
            shift_out: Some(jis_ascii_unit),
            finish: Some(jis_finish),
        },
    )
}

// Decoder-side designations. Roman differs from ASCII only in two glyphs,
// which EUC-JP draws the same way, so both pass bytes through.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Designation {
    Ascii,
    Roman,
    Katakana,
    Jis0208,
    Jis0212,
}

/// Matches one escape sequence starting at `pos` (which holds 0x1B).
///
/// Returns the new designation and the sequence length, `Ok(None)` when
/// the input ends mid-sequence, or an interrupt for sequences this
/// converter recognizes but does not implement.
fn designation_escape(
    input: &[u8],
    pos: usize,
) -> Result<Option<(Designation, usize)>, Interrupt> {
    let Some(&selector) = input.get(pos + 1) else {
        return Ok(None);
    };
    match selector {
        b'(' => match input.get(pos + 2) {
            None => Ok(None),
            Some(b'B') => Ok(Some((Designation::Ascii, 3))),
            Some(b'J') => Ok(Some((Designation::Roman, 3))),
            Some(b'I') => Ok(Some((Designation::Katakana, 3))),
            Some(_) => Err(Interrupt::Unsupported(pos, "escape sequence")),
        },
        b'$' => match input.get(pos + 2) {
            None => Ok(None),
            Some(b'@') | Some(b'B') => Ok(Some((Designation::Jis0208, 3))),
            Some(b'(') => match input.get(pos + 3) {
                None => Ok(None),
                Some(b'D') => Ok(Some((Designation::Jis0212, 4))),
                Some(b'O') | Some(b'P') | Some(b'Q') => {
                    Err(Interrupt::Unsupported(pos, "JIS X 0213 designation"))
                }
                Some(_) => Err(Interrupt::Unsupported(pos, "escape sequence")),
            },
            Some(_) => Err(Interrupt::Unsupported(pos, "escape sequence")),
        },
        _ => Err(Interrupt::Unsupported(pos, "escape sequence")),
    }
}

/// Stream program: ISO-2022-JP to EUC-JP.
fn iso2022jp_decode(input: &[u8], session: &mut TranscodingSession) -> Result<usize, Interrupt> {
    let mut designation = Designation::Ascii;
    let mut pos = 0;
    while pos < input.len() {
        let byte = input[pos];
        if byte == 0x1B {
            match designation_escape(input, pos)? {
                Some((next, len)) => {
                    designation = next;
                    pos += len;
                    continue;
                }
                // Truncated escape: report how far conversion got and let
                // the caller see the leftover.
                None => return Ok(pos),
            }
        }
        if byte == 0x0E || byte == 0x0F {
            return Err(Interrupt::Unsupported(pos, "shift control byte"));
        }
        session.begin_unit();
        match designation {
            Designation::Ascii | Designation::Roman => {
                if byte >= 0x80 {
                    return Err(Interrupt::Illegal(pos));
                }
                session.write(&[byte]);
                pos += 1;
            }
            Designation::Katakana => {
                if !(0x21..=0x5F).contains(&byte) {
                    return Err(Interrupt::Illegal(pos));
                }
                session.write(&[0x8E, byte | 0x80]);
                pos += 1;
            }
            Designation::Jis0208 | Designation::Jis0212 => {
                if !(0x21..=0x7E).contains(&byte) {
                    return Err(Interrupt::Illegal(pos));
                }
                let Some(&trail) = input.get(pos + 1) else {
                    return Ok(pos);
                };
                if !(0x21..=0x7E).contains(&trail) {
                    return Err(Interrupt::Illegal(pos));
                }
                if designation == Designation::Jis0212 {
                    session.write(&[0x8F, byte | 0x80, trail | 0x80]);
                } else {
                    session.write(&[byte | 0x80, trail | 0x80]);
                }
                pos += 2;
            }
        }
    }
    Ok(input.len())
}

fn iso2022jp_decoder() -> Transcoder {
    Transcoder::stream(
        "ISO-2022-JP",
        "EUC-JP",
        iso2022jp_decode,
        3,
        false,
        Hooks::default(),
    )
}

inventory::submit! {
    Registration { build: iso2022jp_decoder }
}

inventory::submit! {
    Registration { build: euc_jp_encoder }
}

inventory::submit! {
    Registration { build: utf8_encoder }
}
