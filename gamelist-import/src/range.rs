use std::ops::Range;

/// A caller-supplied `[start, end)` slice of the rows in a source file.
///
/// Large catalogs are processed across several calls, each covering one
/// slice. `end: None` runs to the end of the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl RowRange {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Clamp against `len` rows. Out-of-range bounds give an empty range.
    pub fn clamp(&self, len: usize) -> Range<usize> {
        let end = self.end.unwrap_or(len).min(len);
        let start = self.start.min(end);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.clamp(rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_everything() {
        assert_eq!(RowRange::all().clamp(10), 0..10);
    }

    #[test]
    fn end_is_clamped() {
        assert_eq!(RowRange::new(5, Some(50)).clamp(10), 5..10);
    }

    #[test]
    fn start_past_end_is_empty() {
        assert_eq!(RowRange::new(20, None).clamp(10), 10..10);
        assert_eq!(RowRange::new(7, Some(3)).clamp(10), 3..3);
        assert!(RowRange::new(20, None).slice(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn slices_rows() {
        let rows = [0, 1, 2, 3, 4];
        assert_eq!(RowRange::new(1, Some(3)).slice(&rows), &[1, 2]);
    }
}
