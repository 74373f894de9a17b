//! End-to-end conversion tests through the public registry API.

use recode::{transcode, EncodedBytes, TranscodeError};

// =============================================================================
// Per-pair smoke tests stamped out for every registered UTF-8 partner
// =============================================================================

/// Tests that apply to every encoding paired with UTF-8 in both directions.
macro_rules! test_utf8_pair {
    ($name:ident, $encoding:literal, ascii_roundtrip: $ascii:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn pair_is_registered_both_ways() {
                assert!(recode::find($encoding, "UTF-8").is_some());
                assert!(recode::find("UTF-8", $encoding).is_some());
            }

            #[test]
            fn empty_input_converts_to_empty_output() {
                assert_eq!(transcode(b"", $encoding, "UTF-8").unwrap(), b"");
                assert_eq!(transcode(b"", "UTF-8", $encoding).unwrap(), b"");
            }

            #[test]
            fn ascii_text_roundtrips() {
                let text = b"The quick brown fox 0123456789";
                let encoded = transcode(text, "UTF-8", $encoding).unwrap();
                if $ascii {
                    assert_eq!(encoded, text.to_vec());
                }
                let back = transcode(&encoded, $encoding, "UTF-8").unwrap();
                assert_eq!(back, text.to_vec());
            }
        }
    };
}

test_utf8_pair!(iso_8859_1, "ISO-8859-1", ascii_roundtrip: true);
test_utf8_pair!(iso_8859_9, "ISO-8859-9", ascii_roundtrip: true);
test_utf8_pair!(us_ascii, "US-ASCII", ascii_roundtrip: true);
test_utf8_pair!(utf_16be, "UTF-16BE", ascii_roundtrip: false);
test_utf8_pair!(utf_16le, "UTF-16LE", ascii_roundtrip: false);
test_utf8_pair!(utf_32be, "UTF-32BE", ascii_roundtrip: false);
test_utf8_pair!(utf_32le, "UTF-32LE", ascii_roundtrip: false);

// =============================================================================
// Single conversions
// =============================================================================

#[test]
fn latin1_e_acute_becomes_two_utf8_bytes() {
    let out = transcode(&[0xE9], "ISO-8859-1", "UTF-8").unwrap();
    assert_eq!(out, vec![0xC3, 0xA9]);
}

#[test]
fn utf8_e_acute_becomes_one_latin1_byte() {
    let out = transcode(&[0xC3, 0xA9], "UTF-8", "ISO-8859-1").unwrap();
    assert_eq!(out, vec![0xE9]);
}

#[test]
fn iso2022jp_ascii_designation_is_transparent() {
    let out = transcode(b"\x1B(BA", "ISO-2022-JP", "EUC-JP").unwrap();
    assert_eq!(out, b"A".to_vec());
}

#[test]
fn iso2022jp_kanji_designation_sets_high_bits() {
    let out = transcode(b"\x1B$B\x30\x21\x1B(B", "ISO-2022-JP", "EUC-JP").unwrap();
    assert_eq!(out, vec![0xB0, 0xA1]);
}

#[test]
fn unregistered_pair_is_unsupported() {
    let err = transcode(b"abc", "Shift_JIS", "KOI8-R").unwrap_err();
    assert_eq!(
        err,
        TranscodeError::UnsupportedPair {
            from: "Shift_JIS".into(),
            to: "KOI8-R".into(),
        }
    );
}

#[test]
fn utf8_to_iso2022jp_ends_in_ascii_designation() {
    let out = transcode("あ".as_bytes(), "UTF-8", "ISO-2022-JP").unwrap();
    assert_eq!(out, b"\x1B$B\x24\x22\x1B(B".to_vec());
    assert!(out.ends_with(b"\x1B(B"));
}

// =============================================================================
// Error reporting
// =============================================================================

#[test]
fn illegal_input_reports_offset_and_pair() {
    let err = transcode(b"ab\x80", "US-ASCII", "UTF-8").unwrap_err();
    assert_eq!(
        err,
        TranscodeError::IllegalSequence {
            from: "US-ASCII".into(),
            to: "UTF-8".into(),
            offset: 2,
        }
    );
}

#[test]
fn unmappable_character_reports_undefined() {
    let err = transcode("a\u{0394}".as_bytes(), "UTF-8", "ISO-8859-1").unwrap_err();
    assert_eq!(
        err,
        TranscodeError::UndefinedMapping {
            from: "UTF-8".into(),
            to: "ISO-8859-1".into(),
            offset: 1,
        }
    );
}

#[test]
fn shift_controls_are_an_unsupported_feature() {
    let err = transcode(b"a\x0F", "ISO-2022-JP", "EUC-JP").unwrap_err();
    assert!(matches!(
        err,
        TranscodeError::UnsupportedFeature { offset: 1, .. }
    ));
}

#[test]
fn truncated_escape_is_incomplete() {
    let err = transcode(b"ab\x1B$", "ISO-2022-JP", "EUC-JP").unwrap_err();
    assert_eq!(
        err,
        TranscodeError::IncompleteConversion {
            from: "ISO-2022-JP".into(),
            to: "EUC-JP".into(),
            consumed: 2,
            total: 4,
        }
    );
}

#[test]
fn errors_use_canonical_registered_names() {
    let err = transcode(b"\x80", "us-ascii", "utf-8").unwrap_err();
    // Decoration uses the canonical registered names.
    assert_eq!(
        err,
        TranscodeError::IllegalSequence {
            from: "US-ASCII".into(),
            to: "UTF-8".into(),
            offset: 0,
        }
    );
}

// =============================================================================
// Longer pipelines
// =============================================================================

#[test]
fn full_latin1_byte_range_roundtrips() {
    let all: Vec<u8> = (0..=0xFF).collect();
    let utf8 = transcode(&all, "ISO-8859-1", "UTF-8").unwrap();
    assert_eq!(transcode(&utf8, "UTF-8", "ISO-8859-1").unwrap(), all);
}

#[test]
fn full_latin5_byte_range_roundtrips() {
    let all: Vec<u8> = (0..=0xFF).collect();
    let utf8 = transcode(&all, "ISO-8859-9", "UTF-8").unwrap();
    assert_eq!(transcode(&utf8, "UTF-8", "ISO-8859-9").unwrap(), all);
}

#[test]
fn full_ascii_byte_range_roundtrips() {
    let all: Vec<u8> = (0..=0x7F).collect();
    let utf8 = transcode(&all, "US-ASCII", "UTF-8").unwrap();
    assert_eq!(utf8, all);
    assert_eq!(transcode(&utf8, "UTF-8", "US-ASCII").unwrap(), all);
}

#[test]
fn mixed_japanese_text_survives_euc_jp_and_back() {
    // "Aあ日B" in UTF-8, through ISO-2022-JP, decoded to EUC-JP.
    let jis = transcode("Aあ日B".as_bytes(), "UTF-8", "ISO-2022-JP").unwrap();
    let euc = transcode(&jis, "ISO-2022-JP", "EUC-JP").unwrap();
    // あ = JIS 0x2422, 日 = JIS 0x467C, shifted into the EUC high plane.
    assert_eq!(euc, vec![0x41, 0xA4, 0xA2, 0xC6, 0xFC, 0x42]);
    // And back out to ISO-2022-JP via the EUC-JP encoder.
    let jis_again = transcode(&euc, "EUC-JP", "ISO-2022-JP").unwrap();
    assert_eq!(jis_again, jis);
}

#[test]
fn utf16_and_utf32_agree_through_utf8() {
    let text = "héllo \u{1F600}";
    let utf16: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    let utf8 = transcode(&utf16, "UTF-16BE", "UTF-8").unwrap();
    assert_eq!(utf8, text.as_bytes());

    let utf32 = transcode(&utf8, "UTF-8", "UTF-32LE").unwrap();
    let expected: Vec<u8> = text.chars().flat_map(|c| (c as u32).to_le_bytes()).collect();
    assert_eq!(utf32, expected);
}

#[test]
fn no_partial_output_reaches_the_caller_in_place() {
    // Valid prefix, then an unmappable character.
    let mut bytes = "caf\u{0394}".as_bytes().to_vec();
    let original = bytes.clone();
    assert!(recode::transcode_in_place(&mut bytes, "UTF-8", "ISO-8859-1").is_err());
    assert_eq!(bytes, original);
}

// =============================================================================
// Tagged byte strings
// =============================================================================

#[test]
fn encoded_bytes_single_argument_uses_the_tag() {
    let s = EncodedBytes::new(b"caf\xE9".to_vec(), "ISO-8859-1");
    let out = s.encode(&["UTF-8"]).unwrap();
    assert_eq!(out.bytes(), "café".as_bytes());
    assert_eq!(out.encoding(), "UTF-8");
}

#[test]
fn encoded_bytes_rejects_bad_arity() {
    let s = EncodedBytes::new(b"x".to_vec(), "UTF-8");
    assert_eq!(
        s.encode(&["a", "b", "c"]).unwrap_err(),
        TranscodeError::WrongArgumentCount { given: 3 }
    );
}
