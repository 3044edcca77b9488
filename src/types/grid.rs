use serde::{Deserialize, Serialize};

use super::CellCoord;

/// Rectangular table of cell text, stored row-major.
///
/// Rows are expected to share one column count, but nothing here relies on
/// it: short rows simply yield fewer cells when sliced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridData {
    rows: Vec<Vec<String>>,
}

impl GridData {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    /// Number of columns, taken from the first row.
    pub fn col_count(&self) -> u32 {
        self.rows
            .first()
            .map_or(0, |row| u32::try_from(row.len()).unwrap_or(u32::MAX))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of a single cell, if it exists.
    pub fn cell(&self, coord: CellCoord) -> Option<&str> {
        self.rows
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
            .map(String::as_str)
    }

    /// Borrow the inclusive rectangle `[row_start, row_end] x [col_start, col_end]`.
    ///
    /// Out-of-range bounds are clipped to the data; a rectangle entirely
    /// outside the data yields an empty region.
    pub fn region(&self, row_start: u32, row_end: u32, col_start: u32, col_end: u32) -> GridRegion<'_> {
        let end = (row_end as usize).saturating_add(1).min(self.rows.len());
        let start = (row_start as usize).min(end);
        GridRegion {
            rows: self.rows.get(start..end).unwrap_or(&[]),
            col_start: col_start as usize,
            col_end: (col_end as usize).saturating_add(1),
        }
    }
}

impl From<Vec<Vec<String>>> for GridData {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// Borrowed rectangular slice of [`GridData`].
#[derive(Debug, Clone, Copy)]
pub struct GridRegion<'a> {
    rows: &'a [Vec<String>],
    col_start: usize,
    col_end: usize,
}

impl<'a> GridRegion<'a> {
    /// An empty region.
    pub fn empty() -> Self {
        Self {
            rows: &[],
            col_start: 0,
            col_end: 0,
        }
    }

    /// Number of rows in the region.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when no row holds any cell.
    pub fn is_empty(&self) -> bool {
        self.iter_rows().all(<[String]>::is_empty)
    }

    /// Iterate rows as cell slices, each clipped to the region's columns.
    pub fn iter_rows(&self) -> impl Iterator<Item = &'a [String]> + 'a {
        let (rows, col_start, col_end) = (self.rows, self.col_start, self.col_end);
        rows.iter().map(move |row| {
            let end = col_end.min(row.len());
            let start = col_start.min(end);
            row.get(start..end).unwrap_or(&[])
        })
    }

    /// Copy the region into owned rows.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.iter_rows().map(<[String]>::to_vec).collect()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn sample(rows: usize, cols: usize) -> GridData {
        GridData::new(
            (0..rows)
                .map(|r| (0..cols).map(|c| format!("{}", r * cols + c)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_counts() {
        let data = sample(4, 3);
        assert_eq!(data.row_count(), 4);
        assert_eq!(data.col_count(), 3);
        assert_eq!(GridData::default().col_count(), 0);
    }

    #[test]
    fn test_region_slices_rows_and_cols() {
        let data = sample(4, 3);
        let region = data.region(1, 2, 1, 2);
        assert_eq!(
            region.to_rows(),
            vec![vec!["4".to_string(), "5".to_string()], vec!["7".to_string(), "8".to_string()]]
        );
    }

    #[test]
    fn test_region_clips_past_the_end() {
        let data = sample(4, 3);
        let region = data.region(3, 100, 2, 50);
        assert_eq!(region.to_rows(), vec![vec!["11".to_string()]]);
    }

    #[test]
    fn test_region_outside_data_is_empty() {
        let data = sample(4, 3);
        assert_eq!(data.region(10, 20, 0, 2).row_count(), 0);
        assert!(data.region(0, 3, 5, 9).is_empty());
    }

    #[test]
    fn test_cell_lookup() {
        let data = sample(2, 2);
        assert_eq!(data.cell(CellCoord::new(1, 1)), Some("3"));
        assert_eq!(data.cell(CellCoord::new(2, 0)), None);
    }

    #[test]
    fn test_deserializes_from_nested_arrays() {
        let data: GridData = serde_json::from_str(r#"[["a","b"],["c","d"]]"#).unwrap();
        assert_eq!(data.cell(CellCoord::new(0, 1)), Some("c"));
    }
}
