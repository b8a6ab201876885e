use super::Grid;

/// The four ways a player can shift the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Rearrange `grid` so that sliding in this direction becomes sliding
    /// every row to the left.
    pub fn orient(self, grid: &Grid) -> Grid {
        match self {
            Direction::Left => grid.clone(),
            Direction::Right => grid.reverse_rows(),
            Direction::Up => grid.transpose(),
            Direction::Down => grid.transpose().reverse_rows(),
        }
    }

    /// Inverse of [`Direction::orient`].
    pub fn restore(self, grid: &Grid) -> Grid {
        match self {
            Direction::Left => grid.clone(),
            Direction::Right => grid.reverse_rows(),
            Direction::Up => grid.transpose(),
            Direction::Down => grid.reverse_rows().transpose(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(size: usize) -> Grid {
        let rows: Vec<Vec<u32>> = (0..size)
            .map(|r| (0..size).map(|c| (r * size + c + 1) as u32).collect())
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_restore_inverts_orient() {
        for size in 2..=6 {
            let grid = numbered(size);
            for dir in Direction::ALL {
                assert_eq!(dir.restore(&dir.orient(&grid)), grid, "{} on {size}x{size}", dir.name());
                assert_eq!(dir.orient(&dir.restore(&grid)), grid, "{} on {size}x{size}", dir.name());
            }
        }
    }

    #[test]
    fn test_orient_puts_leading_edge_first() {
        // 1 2 3
        // 4 5 6
        // 7 8 9
        let grid = numbered(3);
        assert_eq!(Direction::Left.orient(&grid).row(0), &[1, 2, 3]);
        assert_eq!(Direction::Right.orient(&grid).row(0), &[3, 2, 1]);
        assert_eq!(Direction::Up.orient(&grid).row(0), &[1, 4, 7]);
        assert_eq!(Direction::Down.orient(&grid).row(0), &[7, 4, 1]);
    }
}
