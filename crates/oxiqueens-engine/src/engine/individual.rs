use crate::Board;

/// A member of the population: a board together with its cached fitness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    board: Board,
    fitness: u32,
}

impl Individual {
    /// Wraps a board, evaluating its fitness once.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let fitness = board.fitness();
        Self { board, fitness }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    /// Returns whether this individual's board is a solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.fitness == Board::max_fitness(self.board.size())
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }
}

impl From<Board> for Individual {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}
