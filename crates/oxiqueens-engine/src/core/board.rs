use std::fmt;

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest board size for which the N-Queens problem is worth evolving.
///
/// Boards of size 2 and 3 have no solution, and size 1 is trivially solved.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board size.
pub const MAX_BOARD_SIZE: usize = 32;

/// Board size of the classic Eight Queens problem.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Error returned when building a [`Board`] from raw row values.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board must have between 1 and {} columns, got {size}", MAX_BOARD_SIZE)]
    InvalidSize { size: usize },
    #[display("queen in column {column} is on row {row}, outside a board of size {size}")]
    RowOutOfRange { column: usize, row: u8, size: usize },
}

/// A candidate placement of N queens on an N×N board.
///
/// The board holds exactly one queen per column: index `c` of [`Self::rows`] is the
/// row of the queen standing in column `c`. Column conflicts are therefore impossible
/// by construction, and only row and diagonal attacks lower the fitness.
///
/// # Fitness
///
/// Fitness is the number of queen pairs that do not attack each other:
///
/// ```text
/// fitness = C(N, 2) - attacking_pairs
/// ```
///
/// A board is optimal (a solution) when its fitness reaches [`Board::max_fitness`],
/// which is 28 for the 8×8 board.
///
/// # Example
///
/// ```
/// use oxiqueens_engine::Board;
///
/// let solution = Board::new(&[0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
/// assert_eq!(solution.fitness(), 28);
/// assert!(solution.is_optimal());
///
/// let same_row = Board::new(&[0; 8]).unwrap();
/// assert_eq!(same_row.fitness(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    rows: ArrayVec<u8, MAX_BOARD_SIZE>,
}

impl Board {
    /// Creates a board from the row of each column's queen.
    pub fn new(rows: &[u8]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize { size });
        }
        if let Some((column, &row)) = rows
            .iter()
            .enumerate()
            .find(|&(_, &row)| usize::from(row) >= size)
        {
            return Err(BoardError::RowOutOfRange { column, row, size });
        }
        Ok(Self {
            rows: rows.iter().copied().collect(),
        })
    }

    /// Creates a board of `size` columns with every queen on a uniformly random row.
    ///
    /// Draws exactly `size` values from `rng`, one per column from left to right.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`MAX_BOARD_SIZE`].
    #[expect(clippy::cast_possible_truncation)]
    pub fn random<R>(rng: &mut R, size: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&size),
            "board size must be between 1 and {MAX_BOARD_SIZE}"
        );
        let rows = (0..size)
            .map(|_| rng.random_range(0..size) as u8)
            .collect();
        Self { rows }
    }

    /// Returns the maximum fitness of a board with `size` columns, `C(size, 2)`.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn max_fitness(size: usize) -> u32 {
        (size * size.saturating_sub(1) / 2) as u32
    }

    /// Returns the number of columns (and rows) of this board.
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row of each column's queen.
    #[must_use]
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    /// Returns the row of the queen in `column`.
    #[must_use]
    pub fn row(&self, column: usize) -> usize {
        usize::from(self.rows[column])
    }

    /// Returns whether a queen stands on the square at (`column`, `row`).
    #[must_use]
    pub fn has_queen(&self, column: usize, row: usize) -> bool {
        self.rows.get(column).is_some_and(|&r| usize::from(r) == row)
    }

    /// Counts queen pairs sharing a row or a diagonal.
    #[must_use]
    pub fn attacking_pairs(&self) -> u32 {
        let mut count = 0;
        for (c0, &r0) in self.rows.iter().enumerate() {
            for (c1, &r1) in self.rows.iter().enumerate().skip(c0 + 1) {
                if r0 == r1 || usize::from(r0.abs_diff(r1)) == c1 - c0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns the number of non-attacking queen pairs.
    #[must_use]
    pub fn fitness(&self) -> u32 {
        Self::max_fitness(self.size()) - self.attacking_pairs()
    }

    /// Returns whether no two queens attack each other.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.attacking_pairs() == 0
    }

    /// Builds the board made of this board's columns `[0, cut)` followed by the
    /// columns `[cut, N)` of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the boards differ in size or `cut` is past the last column.
    #[must_use]
    pub fn splice(&self, other: &Board, cut: usize) -> Board {
        assert_eq!(self.size(), other.size(), "boards must have the same size");
        assert!(cut <= self.size(), "cut {cut} is outside the board");
        let rows = self.rows[..cut]
            .iter()
            .chain(&other.rows[cut..])
            .copied()
            .collect();
        Board { rows }
    }

    /// Moves the queen of `column` to `row`, returning its previous row.
    ///
    /// # Panics
    ///
    /// Panics if `column` or `row` is outside the board.
    pub fn move_queen(&mut self, column: usize, row: u8) -> u8 {
        assert!(usize::from(row) < self.size(), "row {row} is outside the board");
        std::mem::replace(&mut self.rows[column], row)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.rows.as_slice())
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<u8>) -> Result<Self, Self::Error> {
        Board::new(&rows)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.rows.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const SOLUTION: [u8; 8] = [0, 4, 7, 5, 2, 6, 1, 3];

    /// Reference check written independently from `attacking_pairs`.
    fn no_shared_row_or_diagonal(board: &Board) -> bool {
        let queens = board
            .rows()
            .iter()
            .enumerate()
            .map(|(c, &r)| (i32::try_from(c).unwrap(), i32::from(r)))
            .collect::<Vec<_>>();
        queens.iter().enumerate().all(|(i, &(c0, r0))| {
            queens[i + 1..]
                .iter()
                .all(|&(c1, r1)| r0 != r1 && (c1 - c0).abs() != (r1 - r0).abs())
        })
    }

    #[test]
    fn test_known_solution_is_optimal() {
        let board = Board::new(&SOLUTION).unwrap();
        assert_eq!(board.attacking_pairs(), 0);
        assert_eq!(board.fitness(), 28);
        assert!(board.is_optimal());
    }

    #[test]
    fn test_all_queens_on_one_row() {
        let board = Board::new(&[3; 8]).unwrap();
        assert_eq!(board.attacking_pairs(), 28);
        assert_eq!(board.fitness(), 0);
    }

    #[test]
    fn test_all_queens_on_one_diagonal() {
        let board = Board::new(&[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(board.fitness(), 0);

        let board = Board::new(&[7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        assert_eq!(board.fitness(), 0);
    }

    #[test]
    fn test_counts_every_attacking_pair() {
        // Rows: (0, 2) and (1, 3). Diagonals: (0, 1), (1, 2) and (2, 3).
        let board = Board::new(&[0, 1, 0, 1]).unwrap();
        assert_eq!(board.attacking_pairs(), 5);
        assert_eq!(board.fitness(), 1);
    }

    #[test]
    fn test_max_fitness() {
        assert_eq!(Board::max_fitness(8), 28);
        assert_eq!(Board::max_fitness(4), 6);
        assert_eq!(Board::max_fitness(1), 0);
        assert_eq!(Board::max_fitness(0), 0);
    }

    #[test]
    fn test_random_boards_fitness_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..2000 {
            let board = Board::random(&mut rng, 8);
            assert_eq!(board.size(), 8);
            assert!(board.rows().iter().all(|&r| r < 8));
            assert!(board.fitness() <= 28);
            assert_eq!(board.fitness() == 28, no_shared_row_or_diagonal(&board));
        }
    }

    #[test]
    fn test_four_queens_exhaustive() {
        let mut solutions = 0;
        for index in 0..4u32.pow(4) {
            let rows = (0..4)
                .map(|c| u8::try_from((index / 4u32.pow(c)) % 4).unwrap())
                .collect::<Vec<_>>();
            let board = Board::new(&rows).unwrap();
            assert_eq!(board.is_optimal(), no_shared_row_or_diagonal(&board));
            if board.is_optimal() {
                solutions += 1;
            }
        }
        assert_eq!(solutions, 2);
    }

    #[test]
    fn test_new_rejects_invalid_rows() {
        assert_eq!(
            Board::new(&[0, 1, 8, 2, 3, 4, 5, 6]),
            Err(BoardError::RowOutOfRange {
                column: 2,
                row: 8,
                size: 8
            })
        );
        assert_eq!(Board::new(&[]), Err(BoardError::InvalidSize { size: 0 }));
        assert_eq!(
            Board::new(&[0; MAX_BOARD_SIZE + 1]),
            Err(BoardError::InvalidSize {
                size: MAX_BOARD_SIZE + 1
            })
        );
    }

    #[test]
    fn test_splice() {
        let a = Board::new(&[0, 0, 0, 0]).unwrap();
        let b = Board::new(&[3, 3, 3, 3]).unwrap();
        assert_eq!(a.splice(&b, 1).rows(), &[0, 3, 3, 3]);
        assert_eq!(b.splice(&a, 3).rows(), &[3, 3, 3, 0]);
        assert_eq!(a.splice(&b, 0), b);
        assert_eq!(a.splice(&b, 4), a);
    }

    #[test]
    fn test_move_queen() {
        let mut board = Board::new(&SOLUTION).unwrap();
        assert_eq!(board.move_queen(2, 1), 7);
        assert_eq!(board.row(2), 1);
        assert!(board.has_queen(2, 1));
        assert!(!board.has_queen(2, 7));
        assert!(!board.is_optimal());
    }

    #[test]
    fn test_display() {
        let board = Board::new(&SOLUTION).unwrap();
        assert_eq!(board.to_string(), "[0, 4, 7, 5, 2, 6, 1, 3]");
    }

    #[test]
    fn test_serde_validates_rows() {
        let board = Board::new(&SOLUTION).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[0,4,7,5,2,6,1,3]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
        assert!(serde_json::from_str::<Board>("[0,1,4,2]").is_err());
    }
}
