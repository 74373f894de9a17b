//! Unicode to JIS X 0208 mapping data.
//!
//! Covers the repertoire the ISO-2022-JP encoders carry: the contiguous
//! hiragana, katakana and fullwidth-forms blocks, core CJK punctuation,
//! and a handful of common ideographs. Code points outside the table
//! report an undefined mapping.
//!
//! Values are raw two-byte JIS codes (`0x2422` for あ), not linearized
//! pointers; both bytes are in the 0x21..=0x7E range.

/// Contiguous code-point runs: `(first, last, jis_of_first)`. The JIS code
/// advances by one cell per code point and no run crosses a row boundary.
const RUNS: &[(char, char, u16)] = &[
    // Hiragana ぁ..ん
    ('\u{3041}', '\u{3093}', 0x2421),
    // Katakana ァ..ヶ
    ('\u{30A1}', '\u{30F6}', 0x2521),
    // Fullwidth digits ０..９
    ('\u{FF10}', '\u{FF19}', 0x2330),
    // Fullwidth Ａ..Ｚ
    ('\u{FF21}', '\u{FF3A}', 0x2341),
    // Fullwidth ａ..ｚ
    ('\u{FF41}', '\u{FF5A}', 0x2361),
];

/// Individual mappings, sorted by code point for binary search.
const SINGLES: &[(char, u16)] = &[
    ('\u{3000}', 0x2121), // ideographic space
    ('\u{3001}', 0x2122), // 、
    ('\u{3002}', 0x2123), // 。
    ('\u{30FB}', 0x2126), // ・
    ('\u{30FC}', 0x213C), // ー
    ('\u{4E2D}', 0x4366), // 中
    ('\u{4E9C}', 0x3021), // 亜
    ('\u{65E5}', 0x467C), // 日
    ('\u{672C}', 0x4B5C), // 本
    ('\u{8A9E}', 0x386C), // 語
    ('\u{FF01}', 0x212A), // ！
    ('\u{FF0C}', 0x2124), // ，
    ('\u{FF0E}', 0x2125), // ．
    ('\u{FF1A}', 0x2127), // ：
    ('\u{FF1B}', 0x2128), // ；
    ('\u{FF1F}', 0x2129), // ？
];

/// Looks up the JIS X 0208 code for a character.
pub(crate) fn encode(c: char) -> Option<u16> {
    for &(first, last, jis) in RUNS {
        if c >= first && c <= last {
            return Some(jis + (c as u16 - first as u16));
        }
    }
    SINGLES
        .binary_search_by_key(&c, |&(ch, _)| ch)
        .ok()
        .map(|i| SINGLES[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kana_runs() {
        assert_eq!(encode('あ'), Some(0x2422));
        assert_eq!(encode('ん'), Some(0x2473));
        assert_eq!(encode('ア'), Some(0x2522));
        assert_eq!(encode('ヶ'), Some(0x2576));
    }

    #[test]
    fn singles() {
        assert_eq!(encode('日'), Some(0x467C));
        assert_eq!(encode('本'), Some(0x4B5C));
        assert_eq!(encode('語'), Some(0x386C));
        assert_eq!(encode('\u{3000}'), Some(0x2121));
    }

    #[test]
    fn singles_are_sorted() {
        for pair in SINGLES.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn codes_stay_in_94_by_94_range() {
        let mut check = |jis: u16| {
            let lead = (jis >> 8) as u8;
            let trail = (jis & 0xFF) as u8;
            assert!((0x21..=0x7E).contains(&lead));
            assert!((0x21..=0x7E).contains(&trail));
        };
        for &(first, last, jis) in RUNS {
            check(jis);
            check(jis + (last as u16 - first as u16));
        }
        for &(_, jis) in SINGLES {
            check(jis);
        }
    }

    #[test]
    fn outside_repertoire_is_none() {
        assert_eq!(encode('é'), None);
        assert_eq!(encode('A'), None); // ASCII is not part of JIS X 0208 here
        assert_eq!(encode('\u{1F600}'), None);
    }
}
