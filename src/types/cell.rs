use serde::{Deserialize, Serialize};

/// Logical cell coordinate (0-indexed column and row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl CellCoord {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Build a coordinate from a host-supplied `[col, row]` pair.
    ///
    /// Anything other than exactly two entries is treated as "unset".
    pub fn from_pair(pair: &[u32]) -> Option<Self> {
        match pair {
            [col, row] => Some(Self::new(*col, *row)),
            _ => None,
        }
    }

    /// `[col, row]`, the shape the host sees.
    pub fn to_pair(self) -> [u32; 2] {
        [self.col, self.row]
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((col, row): (u32, u32)) -> Self {
        Self::new(col, row)
    }
}
