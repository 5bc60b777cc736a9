//! Row-level matching rule and scan ranges.
//!
//! A placement is accepted at haystack row `r` when the needle's first row
//! occurs in row `r` at some column `offset > 0` (first occurrence only) and
//! the needle's second row is a prefix of row `r + 1` starting at `offset`.
//! Only these two needle rows are ever compared.

use crate::MonoMask;

/// Direction a row scanner walks the haystack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanDirection {
    /// Top half, ascending row index.
    Forward,
    /// Bottom half, descending row index.
    Backward,
}

impl ScanDirection {
    /// Short lowercase name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ScanDirection::Forward => "forward",
            ScanDirection::Backward => "backward",
        }
    }
}

/// The two needle rows compared at every candidate row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeedleRows {
    first: Vec<bool>,
    second: Vec<bool>,
    width: usize,
    height: usize,
}

impl NeedleRows {
    /// Extracts rows 0 and 1 of the needle.
    ///
    /// Returns `None` when the needle has fewer than two rows.
    pub fn from_mask(needle: &MonoMask) -> Option<Self> {
        if needle.height() < 2 {
            return None;
        }
        Some(Self {
            first: needle.row(0),
            second: needle.row(1),
            width: needle.width(),
            height: needle.height(),
        })
    }

    /// Needle width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Needle height in pixels (only rows 0 and 1 are compared).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the needle can be placed in `haystack` at all.
    pub fn fits_in(&self, haystack: &MonoMask) -> bool {
        self.width <= haystack.width() && self.height < haystack.height()
    }
}

/// Index of the first occurrence of `needle` in `hay`.
pub fn find_subsequence(hay: &[bool], needle: &[bool]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    hay.windows(needle.len()).position(|window| window == needle)
}

/// Tests the two-row rule at haystack row `row`; returns the column offset.
///
/// `row + 1` must be a valid haystack row.
pub fn match_at_row(haystack: &MonoMask, needle: &NeedleRows, row: usize) -> Option<usize> {
    debug_assert!(row + 1 < haystack.height());
    let hay_row = haystack.row(row);
    let offset = find_subsequence(&hay_row, &needle.first)?;
    // A first occurrence at column 0 rejects the whole row.
    if offset == 0 {
        return None;
    }
    let next_row = haystack.row(row + 1);
    next_row[offset..]
        .starts_with(&needle.second)
        .then_some(offset)
}

/// Rows a scanner visits, in visiting order.
///
/// With `mid = height / 2`, the forward scanner covers `[0, mid)` and the
/// backward scanner covers `height - 2` down to `mid`. The last row has no
/// successor and is never a candidate.
pub fn scan_rows(direction: ScanDirection, height: usize) -> Box<dyn Iterator<Item = usize>> {
    let mid = height / 2;
    match direction {
        ScanDirection::Forward => Box::new(0..mid.min(height.saturating_sub(1))),
        ScanDirection::Backward => Box::new((mid..height.saturating_sub(1)).rev()),
    }
}

#[cfg(test)]
mod tests {
    use super::{find_subsequence, match_at_row, scan_rows, NeedleRows, ScanDirection};
    use crate::MonoMask;

    fn mask(rows: &[&str]) -> MonoMask {
        let width = rows[0].len();
        let pixels: Vec<bool> = rows.iter().flat_map(|r| r.chars().map(|c| c == '#')).collect();
        MonoMask::from_bools(&pixels, width, rows.len()).unwrap()
    }

    #[test]
    fn find_subsequence_reports_first_occurrence() {
        let hay = [false, true, true, false, true, true];
        assert_eq!(find_subsequence(&hay, &[true, true]), Some(1));
        assert_eq!(find_subsequence(&hay, &[true, true, true]), None);
        assert_eq!(find_subsequence(&[true], &[true, true]), None);
    }

    #[test]
    fn first_occurrence_at_column_zero_rejects_row() {
        let hay = mask(&["##..##", "##..##", "......"]);
        let needle = NeedleRows::from_mask(&mask(&["##", "##"])).unwrap();
        assert_eq!(match_at_row(&hay, &needle, 0), None);
    }

    #[test]
    fn only_first_occurrence_is_checked_against_second_row() {
        // Row 0 contains the pattern at 1 and 4; row 1 only continues at 4.
        let hay = mask(&[".##.##", "....##", "......"]);
        let needle = NeedleRows::from_mask(&mask(&["##", "##"])).unwrap();
        assert_eq!(match_at_row(&hay, &needle, 0), None);

        let hay = mask(&[".##.##", ".##...", "......"]);
        assert_eq!(match_at_row(&hay, &needle, 0), Some(1));
    }

    #[test]
    fn needle_needs_two_rows() {
        assert!(NeedleRows::from_mask(&mask(&["##"])).is_none());
    }

    #[test]
    fn scan_ranges_cover_every_candidate_row_once() {
        for height in 0..12usize {
            let mut rows: Vec<usize> = scan_rows(ScanDirection::Forward, height)
                .chain(scan_rows(ScanDirection::Backward, height))
                .collect();
            rows.sort_unstable();
            let expected: Vec<usize> = (0..height.saturating_sub(1)).collect();
            assert_eq!(rows, expected, "height {height}");
        }
    }

    #[test]
    fn backward_scan_descends_to_midpoint() {
        let rows: Vec<usize> = scan_rows(ScanDirection::Backward, 8).collect();
        assert_eq!(rows, vec![6, 5, 4]);
        let rows: Vec<usize> = scan_rows(ScanDirection::Forward, 8).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }
}
