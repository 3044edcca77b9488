use serde::{Deserialize, Serialize};

use super::CellCoord;

/// Set of highlighted cells, kept in the order the host supplied them.
///
/// Membership is the only query the renderer needs; duplicates are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    cells: Vec<CellCoord>,
}

impl Selection {
    /// Build from a flat `[col0, row0, col1, row1, ...]` sequence.
    ///
    /// A trailing unpaired value is ignored.
    pub fn from_flat(flat: &[u32]) -> Self {
        Self {
            cells: flat
                .chunks_exact(2)
                .filter_map(CellCoord::from_pair)
                .collect(),
        }
    }

    /// Flatten back into `[col0, row0, col1, row1, ...]`.
    pub fn to_flat(&self) -> Vec<u32> {
        self.cells.iter().flat_map(|c| c.to_pair()).collect()
    }

    /// True if `(col, row)` appears anywhere in the selection.
    pub fn contains(&self, col: u32, row: u32) -> bool {
        self.cells.iter().any(|c| c.col == col && c.row == row)
    }

    pub fn push(&mut self, coord: CellCoord) {
        self.cells.push(coord);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellCoord> {
        self.cells.iter()
    }
}

impl FromIterator<CellCoord> for Selection {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
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

    #[test]
    fn test_from_flat_pairs() {
        let selection = Selection::from_flat(&[6, 2, 3, 5, 0, 8]);
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(6, 2));
        assert!(selection.contains(0, 8));
        assert!(!selection.contains(2, 6));
    }

    #[test]
    fn test_trailing_value_ignored() {
        let selection = Selection::from_flat(&[1, 2, 3]);
        assert_eq!(selection.to_flat(), vec![1, 2]);
        assert!(!selection.contains(3, 0));
    }

    #[test]
    fn test_collect_matches_flat() {
        let collected: Selection = [(6, 2), (3, 5)].into_iter().map(CellCoord::from).collect();
        assert_eq!(collected, Selection::from_flat(&[6, 2, 3, 5]));
        assert!(collected.contains(3, 5));
    }

    #[test]
    fn test_pairs_do_not_straddle() {
        // (2, 3) only appears across the boundary of two pairs
        let selection = Selection::from_flat(&[1, 2, 3, 4]);
        assert!(!selection.contains(2, 3));
    }
}
