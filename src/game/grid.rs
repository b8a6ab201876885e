use std::fmt;

/// Default board edge length.
pub const DEFAULT_SIZE: usize = 4;

/// Square matrix of tile values, 0 meaning empty. Stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Create an empty `size` x `size` grid
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a grid from rows. Returns `None` unless the rows form a square.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Grid { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the value at a specific position. Row 0 is the top.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row * self.size + col] = value;
    }

    pub fn row(&self, row: usize) -> &[u32] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u32] {
        let start = row * self.size;
        &mut self.cells[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Swap rows and columns. Its own inverse.
    pub fn transpose(&self) -> Grid {
        let mut out = Grid::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                out.set(col, row, self.get(row, col));
            }
        }
        out
    }

    /// Mirror every row left-to-right. Its own inverse.
    pub fn reverse_rows(&self) -> Grid {
        let mut out = self.clone();
        for row in 0..self.size {
            out.row_mut(row).reverse();
        }
        out
    }

    /// Coordinates of all empty cells, in row-major order
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Check whether any two horizontally or vertically adjacent cells hold
    /// the same value.
    pub fn has_adjacent_equal(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if col > 0 && self.get(row, col - 1) == value {
                    return true;
                }
                if row > 0 && self.get(row - 1, col) == value {
                    return true;
                }
            }
        }
        false
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Display width of each column: digits of its widest value.
    pub fn column_widths(&self) -> Vec<usize> {
        (0..self.size)
            .map(|col| {
                let max = (0..self.size).map(|row| self.get(row, col)).max().unwrap_or(0);
                max.to_string().len()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (value, width) in row.iter().zip(&widths) {
                write!(f, "{:>w$}", value, w = width + 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.empty_cells().len(), 16);
        assert!(!grid.is_full());
        assert_eq!(grid.max_tile(), 0);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        assert!(Grid::from_rows(&[vec![2u32, 0], vec![0]]).is_none());
        assert!(Grid::from_rows(&[vec![2u32, 0, 0], vec![0, 0, 0]]).is_none());
        assert!(Grid::from_rows(&[[2u32, 0], [0, 4]]).is_some());
    }

    #[test]
    fn test_transpose() {
        let grid = Grid::from_rows(&[[1u32, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        let t = grid.transpose();
        assert_eq!(t.row(0), &[1, 4, 7]);
        assert_eq!(t.row(2), &[3, 6, 9]);
        assert_eq!(t.transpose(), grid);
    }

    #[test]
    fn test_reverse_rows() {
        let grid = Grid::from_rows(&[[1u32, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        let r = grid.reverse_rows();
        assert_eq!(r.row(1), &[6, 5, 4]);
        assert_eq!(r.reverse_rows(), grid);
    }

    #[test]
    fn test_empty_cells_coordinates() {
        let grid = Grid::from_rows(&[[2u32, 0], [4, 0]]).unwrap();
        assert_eq!(grid.empty_cells(), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_adjacent_equal_horizontal_and_vertical() {
        let horizontal = Grid::from_rows(&[[2u32, 2], [4, 8]]).unwrap();
        assert!(horizontal.has_adjacent_equal());

        let vertical = Grid::from_rows(&[[2u32, 4], [2, 8]]).unwrap();
        assert!(vertical.has_adjacent_equal());

        let diagonal_only = Grid::from_rows(&[[2u32, 4], [4, 2]]).unwrap();
        assert!(!diagonal_only.has_adjacent_equal());
    }

    #[test]
    fn test_display_right_aligns_columns() {
        let grid = Grid::from_rows(&[[2u32, 128], [16, 0]]).unwrap();
        assert_eq!(grid.to_string(), "  2 128\n 16   0");
    }

    #[test]
    fn test_total_and_max() {
        let grid = Grid::from_rows(&[[2u32, 128], [16, 0]]).unwrap();
        assert_eq!(grid.total(), 146);
        assert_eq!(grid.max_tile(), 128);
    }
}
