//! Step records emitted by the evolution state machine.
//!
//! A [`StepRecord`] is an immutable snapshot of one algorithmic sub-step of a
//! generation. It owns copies of the boards relevant to that sub-step, each annotated
//! with a [`Tag`] describing what happened to it. Renderers map tags to colors; the
//! engine never decides how a step looks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Board, FitnessStats};

/// Kind of sub-step within one generation, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Selection,
    CrossoverCut,
    CrossoverResult,
    Mutation,
    NaturalSelection,
}

impl StepKind {
    /// All kinds in the order they are emitted within a generation.
    pub const ALL: [Self; 5] = [
        Self::Selection,
        Self::CrossoverCut,
        Self::CrossoverResult,
        Self::Mutation,
        Self::NaturalSelection,
    ];

    /// Number of steps emitted per generation.
    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Selection => "Tournament selection",
            Self::CrossoverCut => "Crossover (cut points)",
            Self::CrossoverResult => "Crossover (offspring)",
            Self::Mutation => "Mutation",
            Self::NaturalSelection => "Natural selection",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annotation attached to one board of a step.
///
/// Columns are 0-based. Cut positions are the first column taken from the second
/// parent, so the left half is `[0, cut)` and the right half is `[cut, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tag {
    /// Not affected by this step (e.g. the unpaired last individual of an odd population).
    Untouched,
    /// Won `times` tournaments during selection (0 when never selected).
    Selected { times: usize },
    /// First parent of a crossed pair; its left half goes to the first child.
    CutLeft { cut: usize },
    /// Second parent of a crossed pair; its left half goes to the second child.
    CutRight { cut: usize },
    /// Member of a pair that passed through without crossover.
    NotCrossed,
    /// Child whose left half comes from the first parent.
    ParentA { cut: usize },
    /// Child whose left half comes from the second parent.
    ParentB { cut: usize },
    /// Queen of `column` moved away from `previous_row`.
    Mutated { column: usize, previous_row: u8 },
    Unchanged,
    /// Kept by natural selection at 1-based `rank`.
    Survivor { rank: usize },
    Discarded,
}

/// A board shown by a step, with its fitness and annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedBoard {
    pub board: Board,
    pub fitness: u32,
    pub tag: Tag,
}

impl AnnotatedBoard {
    #[must_use]
    pub fn new(board: Board, tag: Tag) -> Self {
        let fitness = board.fitness();
        Self {
            board,
            fitness,
            tag,
        }
    }

    /// Returns whether the board is a solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.fitness == Board::max_fitness(self.board.size())
    }
}

/// One immutable snapshot of a sub-step of the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 0-based generation this step belongs to.
    pub generation: usize,
    pub kind: StepKind,
    pub title: String,
    pub description: String,
    /// Fitness statistics of the population this step is about.
    pub stats: FitnessStats,
    pub boards: Vec<AnnotatedBoard>,
}

impl StepRecord {
    pub(crate) fn new(
        generation: usize,
        kind: StepKind,
        description: String,
        stats: FitnessStats,
        boards: Vec<AnnotatedBoard>,
    ) -> Self {
        Self {
            generation,
            kind,
            title: format!("Generation #{generation}: {}", kind.label()),
            description,
            stats,
            boards,
        }
    }
}

/// Formats a probability as a percentage, e.g. `0.03` as `3%` and `0.125` as `12.5%`.
pub(crate) fn percent(rate: f64) -> String {
    let text = format!("{:.1}", rate * 100.0);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}%")
}
