//! Structural disambiguation of the composite data cell.
//!
//! The extractor flattens the cell's stacked sub-lines into one
//! newline-separated string, so the same physical layout tokenizes
//! differently depending on which optional sub-fields are present
//! (reference number inline, underscore-joined, or on its own line; weight
//! value and unit together or apart). Three structural signals read off the
//! raw text select one of a fixed set of token layouts; each layout pins
//! the token indices of every field.

use std::sync::LazyLock;

use regex::Regex;

/// "kg" immediately after a line break: the weight value and its unit
/// landed on separate visual lines.
static KG_AFTER_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\nkg").unwrap());

/// A parenthesized numeric token immediately after a line break: the
/// reference number landed on its own visual line.
static REF_AFTER_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\(\d+\)").unwrap());

/// Token layout of the composite cell, resolved from the structural
/// signals. One variant per observed arrangement plus an explicit variant
/// for the combination the source documents leave ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single-line weight, no reference number.
    Plain,
    /// Reference split into two underscore-marked tokens bracketing the row.
    RefUnderscore,
    /// Parenthesized reference inline with the counts.
    RefInline,
    /// Parenthesized reference on its own line.
    RefOnOwnLine,
    /// Weight value and unit on separate lines, no reference number.
    WeightSplit,
    /// Weight split across lines AND a reference present. The token order
    /// for this combination is ambiguous, so rows like this are rejected
    /// rather than guessed at.
    WeightSplitWithRef,
}

/// Which whitespace-split token indices carry each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPositions {
    pub pieces: usize,
    pub weight: usize,
    /// VAT-liable, VAT-exempt, total: always the trailing three amounts.
    pub amounts: [usize; 3],
    pub reference: RefSource,
}

/// Where the reference number lives in the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSource {
    None,
    /// Two tokens concatenated; the underscore variant splits the number
    /// around the counts.
    Joined(usize, usize),
    /// A single token wrapped in parentheses.
    Parenthesized(usize),
}

impl Layout {
    /// Resolve the layout from the normalized, pre-collapse cell text
    /// (numeric normalization applied, newlines still intact).
    ///
    /// The reference sub-signals are only consulted when a reference marker
    /// is present at all, mirroring how the layouts actually branch.
    pub fn detect(text: &str) -> Layout {
        let weight_on_two_lines = KG_AFTER_NEWLINE.is_match(text);
        let has_reference = text.contains(['(', ')', '_']);

        match (weight_on_two_lines, has_reference) {
            (false, false) => Layout::Plain,
            (true, false) => Layout::WeightSplit,
            (true, true) => Layout::WeightSplitWithRef,
            (false, true) => {
                if text.contains('_') {
                    Layout::RefUnderscore
                } else if REF_AFTER_NEWLINE.is_match(text) {
                    Layout::RefOnOwnLine
                } else {
                    Layout::RefInline
                }
            }
        }
    }

    /// Token positions for this layout; `None` for the unsupported variant.
    pub fn positions(self) -> Option<FieldPositions> {
        let positions = match self {
            Layout::Plain => FieldPositions {
                pieces: 0,
                weight: 1,
                amounts: [3, 4, 5],
                reference: RefSource::None,
            },
            Layout::RefUnderscore => FieldPositions {
                pieces: 1,
                weight: 2,
                amounts: [4, 5, 6],
                reference: RefSource::Joined(0, 7),
            },
            Layout::RefInline => FieldPositions {
                pieces: 0,
                weight: 1,
                amounts: [4, 5, 6],
                reference: RefSource::Parenthesized(3),
            },
            Layout::RefOnOwnLine => FieldPositions {
                pieces: 1,
                weight: 2,
                amounts: [4, 5, 6],
                reference: RefSource::Parenthesized(7),
            },
            Layout::WeightSplit => FieldPositions {
                pieces: 1,
                weight: 0,
                amounts: [2, 3, 4],
                reference: RefSource::None,
            },
            Layout::WeightSplitWithRef => return None,
        };
        Some(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() {
        assert_eq!(Layout::detect("2 0.50 kg 100.00 200.00 300.00"), Layout::Plain);
    }

    #[test]
    fn test_weight_split() {
        assert_eq!(
            Layout::detect("0.50 2 100.00 200.00 300.00\nkg"),
            Layout::WeightSplit
        );
    }

    #[test]
    fn test_kg_inside_a_line_is_not_split() {
        // "kg" preceded by a space, not a newline
        assert_eq!(Layout::detect("2 0.50 kg\n100.00 200.00 300.00"), Layout::Plain);
    }

    #[test]
    fn test_ref_underscore_wins_over_own_line() {
        assert_eq!(
            Layout::detect("046393_ 2 0.50 kg 100.00 200.00 300.00\n(0618)"),
            Layout::RefUnderscore
        );
    }

    #[test]
    fn test_ref_inline() {
        assert_eq!(
            Layout::detect("2 0.50 kg (228959992) 100.00 200.00 300.00"),
            Layout::RefInline
        );
    }

    #[test]
    fn test_ref_on_own_line() {
        assert_eq!(
            Layout::detect("(046393 1 0.50 kg 100.00 200.00 300.00\n(0618)"),
            Layout::RefOnOwnLine
        );
    }

    #[test]
    fn test_weight_split_with_reference_is_unsupported() {
        let l = Layout::detect("(123456) 0.50 2 100.00 200.00 300.00\nkg");
        assert_eq!(l, Layout::WeightSplitWithRef);
        assert_eq!(l.positions(), None);

        let l = Layout::detect("123_ 0.50 2 100.00 200.00 300.00 _456\nkg");
        assert_eq!(l, Layout::WeightSplitWithRef);
        assert_eq!(l.positions(), None);
    }

    #[test]
    fn test_every_supported_layout_has_positions() {
        for layout in [
            Layout::Plain,
            Layout::RefUnderscore,
            Layout::RefInline,
            Layout::RefOnOwnLine,
            Layout::WeightSplit,
        ] {
            assert!(layout.positions().is_some());
        }
    }
}
