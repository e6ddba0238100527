#![forbid(unsafe_code)]

//! Value codec: joins cell values into the logical field value and splits a
//! string back into per-cell assignments.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::cell::CellStore;
use super::error::PinError;

/// What kind of characters the field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Any visible character.
    #[default]
    Text,
    /// ASCII digits only.
    Number,
}

impl InputMode {
    /// Check whether `value` is acceptable in this mode.
    ///
    /// The empty string is always accepted so a field can be cleared.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Text => true,
            Self::Number => value.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Concatenate cell values in index order. Empty cells contribute nothing.
pub fn encode(cells: &CellStore) -> String {
    cells.iter().filter_map(|cell| cell.value()).collect()
}

/// Split `value` into one slot per cell.
///
/// Cell `i` receives grapheme `i` of `value`; cells past the end of `value`
/// are empty and graphemes past `len` are dropped.
pub fn decode(value: &str, len: usize, mode: InputMode) -> Result<Vec<Option<String>>, PinError> {
    if !mode.accepts(value) {
        return Err(PinError::NonNumericValue(value.to_owned()));
    }
    let mut graphemes = value.graphemes(true);
    Ok((0..len)
        .map(|_| graphemes.next().map(str::to_owned))
        .collect())
}

/// Whether a grapheme boundary survives between `left` and `right` once
/// they are joined.
///
/// Regional indicators, emoji ZWJ sequences and similar clusters can fuse
/// across the join, and a fused pair would decode as one cell.
pub fn keeps_boundary(left: &str, right: &str) -> bool {
    if left.is_empty() || right.is_empty() {
        return true;
    }
    let joined = [left, right].concat();
    joined
        .grapheme_indices(true)
        .any(|(at, _)| at == left.len())
}

/// First visible grapheme of `text`, the only part a cell keeps.
///
/// Zero-width clusters (stray combining marks, control characters) are
/// skipped.
pub fn first_grapheme(text: &str) -> Option<&str> {
    text.graphemes(true)
        .find(|g| UnicodeWidthStr::width(*g) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(len: usize, values: &[(usize, &str)]) -> CellStore {
        let mut store = CellStore::new(len);
        for (i, v) in values {
            store.set(*i, v);
        }
        store
    }

    #[test]
    fn encode_skips_empty_cells() {
        let store = store_with(4, &[(1, "2"), (3, "4")]);
        assert_eq!(encode(&store), "24");
    }

    #[test]
    fn encode_empty_field() {
        assert_eq!(encode(&CellStore::new(0)), "");
        assert_eq!(encode(&CellStore::new(3)), "");
    }

    #[test]
    fn decode_pads_and_truncates() {
        let short = decode("12", 4, InputMode::Text).unwrap();
        assert_eq!(
            short,
            vec![Some("1".into()), Some("2".into()), None, None]
        );
        let long = decode("123456", 3, InputMode::Text).unwrap();
        assert_eq!(long.len(), 3);
        assert_eq!(long[2].as_deref(), Some("3"));
    }

    #[test]
    fn decode_number_mode_gate() {
        assert_eq!(
            decode("12a4", 4, InputMode::Number),
            Err(PinError::NonNumericValue("12a4".into()))
        );
        assert!(decode("", 4, InputMode::Number).is_ok());
        assert!(decode("0042", 4, InputMode::Number).is_ok());
        assert!(decode("12a4", 4, InputMode::Text).is_ok());
    }

    #[test]
    fn decode_splits_graphemes() {
        let cells = decode("e\u{301}x", 2, InputMode::Text).unwrap();
        assert_eq!(cells[0].as_deref(), Some("e\u{301}"));
        assert_eq!(cells[1].as_deref(), Some("x"));
    }

    #[test]
    fn number_mode_rejects_non_ascii_digits() {
        assert!(!InputMode::Number.accepts("\u{0663}"));
        assert!(InputMode::Number.accepts(""));
    }

    #[test]
    fn boundaries_between_graphemes() {
        assert!(keeps_boundary("1", "2"));
        assert!(keeps_boundary("e\u{301}", "x"));
        assert!(keeps_boundary("", "\u{1F1F8}"));
        // Two regional indicators pair into one flag.
        assert!(!keeps_boundary("\u{1F1FA}", "\u{1F1F8}"));
        // A trailing ZWJ glues the next pictograph on.
        assert!(!keeps_boundary("\u{1F468}\u{200D}", "\u{1F469}"));
        assert!(keeps_boundary("\u{1F1FA}\u{1F1F8}", "\u{1F1E9}\u{1F1EA}"));
    }

    #[test]
    fn decode_inverts_encode_for_cleanly_split_cells() {
        let store = store_with(4, &[(0, "\u{1F1FA}\u{1F1F8}"), (1, "e\u{301}"), (2, "\u{4E2D}")]);
        let cells: Vec<_> = store.iter().map(|c| c.value().map(str::to_owned)).collect();
        assert_eq!(decode(&encode(&store), 4, InputMode::Text), Ok(cells));
    }

    #[test]
    fn first_grapheme_skips_zero_width() {
        assert_eq!(first_grapheme("ab"), Some("a"));
        assert_eq!(first_grapheme("\u{200b}9"), Some("9"));
        assert_eq!(first_grapheme(""), None);
        assert_eq!(first_grapheme("\u{200b}"), None);
    }
}
