//! Genetic operators on boards.
//!
//! These are the building blocks used by [`Evolution`](crate::Evolution) for each
//! state of a generation:
//!
//! - **Selection**: [`tournament_select`] picks the fittest of `k` random draws
//! - **Crossover**: [`random_cut`] and [`crossover`] splice two parents at one column
//! - **Mutation**: [`mutate`] moves one random queen to a random row
//!
//! Every operator takes the random generator explicitly and documents how many
//! values it draws, so that the order of draws within a generation is fixed and a
//! seed reproduces the same run.

use rand::Rng;

use crate::{Board, Individual};

/// Selects an individual using tournament selection.
///
/// Draws `tournament_size` indices uniformly at random, with replacement, and
/// returns the index of the fittest drawn individual. Ties are won by the
/// individual drawn first.
///
/// Draws exactly `tournament_size` values from `rng`.
///
/// # Panics
///
/// Panics if `population` is empty or `tournament_size` is zero.
pub fn tournament_select<R>(population: &[Individual], tournament_size: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    assert!(!population.is_empty(), "cannot select from an empty population");
    assert!(tournament_size > 0, "tournament must draw at least one individual");

    let mut winner = rng.random_range(0..population.len());
    for _ in 1..tournament_size {
        let challenger = rng.random_range(0..population.len());
        if population[challenger].fitness() > population[winner].fitness() {
            winner = challenger;
        }
    }
    winner
}

/// Draws a cut column uniformly in `[1, size - 1]`.
///
/// Draws exactly one value from `rng`.
///
/// # Panics
///
/// Panics if `size` is smaller than 2.
pub fn random_cut<R>(size: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    rng.random_range(1..size)
}

/// Single-point crossover at column `cut`.
///
/// Returns `(a[..cut] + b[cut..], b[..cut] + a[cut..])`.
///
/// # Example
///
/// ```
/// use oxiqueens_engine::{Board, operators};
///
/// let a = Board::new(&[0, 0, 0, 0]).unwrap();
/// let b = Board::new(&[3, 3, 3, 3]).unwrap();
/// let (child_a, child_b) = operators::crossover(&a, &b, 1);
/// assert_eq!(child_a.rows(), &[0, 3, 3, 3]);
/// assert_eq!(child_b.rows(), &[3, 0, 0, 0]);
/// ```
#[must_use]
pub fn crossover(a: &Board, b: &Board, cut: usize) -> (Board, Board) {
    (a.splice(b, cut), b.splice(a, cut))
}

/// A queen moved by [`mutate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub column: usize,
    pub previous_row: u8,
    pub row: u8,
}

/// Moves the queen of a uniformly random column to a uniformly random row.
///
/// The new row may equal the previous one. Draws exactly two values from `rng`:
/// the column, then the row.
#[expect(clippy::cast_possible_truncation)]
pub fn mutate<R>(board: &mut Board, rng: &mut R) -> Mutation
where
    R: Rng + ?Sized,
{
    let column = rng.random_range(0..board.size());
    let row = rng.random_range(0..board.size()) as u8;
    let previous_row = board.move_queen(column, row);
    Mutation {
        column,
        previous_row,
        row,
    }
}
