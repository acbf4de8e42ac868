use std::fmt;

use rand::Rng;
use tracing::debug;

use crate::cell::Cell;
use crate::error::GridError;

/// Moore neighbourhood offsets, in `(row, col)` order. The cell itself is never part of it.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed size toroidal grid of [`Cell`]s.
///
/// The top edge is adjacent to the bottom edge and the left edge to the right edge. Cells are
/// addressed as `(row, col)` with `0 <= row < height` and `0 <= col < width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,

    /// Row-major storage. Always holds exactly `height * width` cells.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is dead. Either dimension may be `0`, which yields an empty
    /// grid.
    ///
    /// Panics if `height * width` overflows. See [`Grid::try_new`] for a checked version.
    pub fn new(height: usize, width: usize) -> Self {
        match Self::try_new(height, width) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(height: usize, width: usize) -> Result<Self, GridError> {
        let Some(n) = height.checked_mul(width) else {
            return Err(GridError::TooLarge { height, width });
        };

        Ok(Self {
            height,
            width,
            cells: vec![Cell::dead(); n],
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the grid holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead());
    }

    /// Set every cell alive independently with probability `fraction_alive`.
    ///
    /// The random source is owned by the caller so that a run seeds it once, and tests can pass a
    /// seeded generator.
    pub fn randomize<R>(&mut self, fraction_alive: f64, rng: &mut R) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        if !(0f64..=1f64).contains(&fraction_alive) {
            return Err(GridError::InvalidFraction(fraction_alive));
        }

        for cell in self.cells.iter_mut() {
            cell.set_state(rng.gen_bool(fraction_alive));
        }

        debug!(
            fraction_alive,
            population = self.population(),
            "randomized {}x{} grid",
            self.height,
            self.width
        );

        Ok(())
    }

    /// Count the live cells among the 8 neighbours of `(row, col)`, wrapping rows and columns
    /// independently.
    ///
    /// On grids with a single row or column, several offsets wrap onto the same cell (possibly
    /// `(row, col)` itself). Each offset is counted on its own.
    ///
    /// Panics if `(row, col)` lies outside the grid, which includes every coordinate of an empty
    /// grid.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.assert_in_bounds(row, col);

        let (h, w) = (self.height as isize, self.width as isize);
        let (row, col) = (row as isize, col as isize);

        let mut n = 0;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let r = (row + dr).rem_euclid(h) as usize;
            let c = (col + dc).rem_euclid(w) as usize;

            if self.cells[self.index(r, c)].is_alive() {
                n += 1;
            }
        }

        n
    }

    /// Write the state of the cell at `(row, col)`.
    ///
    /// Panics if the coordinate is out of bounds. See [`Grid::try_set_cell`] for a checked
    /// version.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        self.assert_in_bounds(row, col);

        let i = self.index(row, col);
        self.cells[i].set_state(alive);
    }

    pub fn try_set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }

        let i = self.index(row, col);
        self.cells[i].set_state(alive);

        Ok(())
    }

    /// Read-only view of the cell at `(row, col)`.
    ///
    /// Panics if the coordinate is out of bounds. See [`Grid::get`] for a checked version.
    pub fn get_cell(&self, row: usize, col: usize) -> &Cell {
        self.assert_in_bounds(row, col);

        &self.cells[self.index(row, col)]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.contains(row, col) {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Iterate over rows, top to bottom. Always yields `height` rows, which are empty when the
    /// grid has no columns.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let w = self.width;
        (0..self.height).map(move |row| &self.cells[row * w..(row + 1) * w])
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn assert_in_bounds(&self, row: usize, col: usize) {
        assert!(
            self.contains(row, col),
            "{}",
            self.out_of_bounds(row, col)
        );
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }
}

/// Plain text view of the grid, `O` for live cells and `.` for dead ones, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for cell in row {
                let c = if cell.is_alive() { 'O' } else { '.' };
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Grid;
    use crate::error::GridError;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(4, 7);

        assert_eq!(grid.height(), 4);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.rows().count(), 4);
        assert!(grid.rows().all(|row| row.len() == 7));
    }

    #[test]
    fn zero_sized_grids_are_valid() {
        for (h, w) in [(0, 0), (0, 5), (5, 0)] {
            let grid = Grid::new(h, w);

            assert!(grid.is_empty());
            assert_eq!(grid.population(), 0);
            assert!(grid.get(0, 0).is_none());
        }
    }

    #[test]
    fn columnless_grids_still_have_rows() {
        let grid = Grid::new(3, 0);

        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.is_empty()));
        assert_eq!(grid.to_string(), "\n\n");
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let (h, w) = (1usize << 33, usize::MAX >> 2);

        assert_eq!(
            Grid::try_new(h, w),
            Err(GridError::TooLarge {
                height: h,
                width: w
            })
        );
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn new_panics_on_overflow() {
        Grid::new(usize::MAX, 2);
    }

    #[test]
    fn set_and_get() {
        let mut grid = Grid::new(3, 3);

        grid.set_cell(1, 2, true);

        assert!(grid.get_cell(1, 2).is_alive());
        assert!(!grid.get_cell(2, 1).is_alive());
        assert_eq!(grid.population(), 1);

        grid.set_cell(1, 2, false);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    #[should_panic(expected = "outside of a 3x4 grid")]
    fn set_cell_out_of_bounds_panics() {
        let mut grid = Grid::new(3, 4);
        grid.set_cell(3, 0, true);
    }

    #[test]
    #[should_panic(expected = "outside of a 3x4 grid")]
    fn get_cell_out_of_bounds_panics() {
        let grid = Grid::new(3, 4);
        grid.get_cell(0, 4);
    }

    #[test]
    #[should_panic(expected = "outside of a 0x0 grid")]
    fn neighbors_on_empty_grid_panics() {
        let grid = Grid::new(0, 0);
        grid.count_live_neighbors(0, 0);
    }

    #[test]
    fn try_set_cell_reports_bounds() {
        let mut grid = Grid::new(2, 2);

        assert_eq!(grid.try_set_cell(1, 1, true), Ok(()));
        assert_eq!(
            grid.try_set_cell(2, 1, true),
            Err(GridError::OutOfBounds {
                row: 2,
                col: 1,
                height: 2,
                width: 2
            })
        );
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn neighbors_wrap_around_corners() {
        let mut grid = Grid::new(5, 5);

        grid.set_cell(4, 4, true);
        grid.set_cell(0, 4, true);
        grid.set_cell(4, 0, true);

        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        assert_eq!(grid.count_live_neighbors(2, 2), 0);
    }

    #[test]
    fn neighbors_skip_the_cell_itself() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(1, 1, true);

        assert_eq!(grid.count_live_neighbors(1, 1), 0);

        for row in 0..3 {
            for col in 0..3 {
                grid.set_cell(row, col, true);
            }
        }

        assert_eq!(grid.count_live_neighbors(1, 1), 8);
    }

    #[test]
    fn single_cell_grid_sees_itself_through_the_wrap() {
        let mut grid = Grid::new(1, 1);

        assert_eq!(grid.count_live_neighbors(0, 0), 0);

        grid.set_cell(0, 0, true);
        assert_eq!(grid.count_live_neighbors(0, 0), 8);
    }

    #[test]
    fn single_row_grid_counts_duplicates() {
        // . O .
        let mut grid = Grid::new(1, 3);
        grid.set_cell(0, 1, true);

        // the three offsets of column +1 all land on (0, 1)
        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        // (0, 1) only sees itself through the rows above and below
        assert_eq!(grid.count_live_neighbors(0, 1), 2);
    }

    #[test]
    fn randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(6, 9);

        grid.randomize(1.0, &mut rng).unwrap();
        assert_eq!(grid.population(), 54);

        grid.randomize(0.0, &mut rng).unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn randomize_is_reproducible_with_a_seed() {
        let mut a = Grid::new(10, 10);
        let mut b = Grid::new(10, 10);

        a.randomize(0.4, &mut StdRng::seed_from_u64(42)).unwrap();
        b.randomize(0.4, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn randomize_rejects_bad_fractions() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(2, 2);

        for fraction in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                grid.randomize(fraction, &mut rng),
                Err(GridError::InvalidFraction(_))
            ));
        }
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = Grid::new(3, 3);
        grid.randomize(1.0, &mut StdRng::seed_from_u64(1)).unwrap();

        grid.clear();

        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn display_grid() {
        let mut grid = Grid::new(2, 3);
        grid.set_cell(0, 1, true);
        grid.set_cell(1, 2, true);

        assert_eq!(grid.to_string(), ".O.\n..O");
    }
}
