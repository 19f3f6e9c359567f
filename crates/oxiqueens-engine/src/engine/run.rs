use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Board, ConfigError, Evolution, EvolutionConfig, FitnessStats, Seed, StepKind, StepRecord,
};

/// Fitness statistics of one population that existed during a run.
///
/// Index 0 is the initial population; index `g + 1` is the population produced by the
/// natural selection of generation `g`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub index: usize,
    pub stats: FitnessStats,
}

/// How a run terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A board of maximum fitness survived natural selection.
    Solved {
        /// Number of generations processed.
        generations: usize,
        /// Distinct optimal boards in the final population, in rank order.
        solutions: Vec<Board>,
    },
    /// The generation cap was reached without a solution.
    Exhausted {
        /// Number of generations processed.
        generations: usize,
        /// Fittest board of the final population.
        best: Board,
    },
}

impl Outcome {
    /// Returns the number of generations processed before termination.
    #[must_use]
    pub fn generations(&self) -> usize {
        match self {
            Self::Solved { generations, .. } | Self::Exhausted { generations, .. } => *generations,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved {
                generations,
                solutions,
            } => {
                write!(f, "solved after {generations} generation(s)")?;
                if let Some(first) = solutions.first() {
                    write!(f, ": {first}")?;
                }
                if solutions.len() > 1 {
                    write!(f, " (+{} more)", solutions.len() - 1)?;
                }
                Ok(())
            }
            Self::Exhausted { generations, best } => write!(
                f,
                "unsolved after {generations} generation(s), best {best} with fitness {}",
                best.fitness()
            ),
        }
    }
}

/// The finalized record of one seeded evolution.
///
/// A run is an ordered sequence of [`StepRecord`]s, five per generation, plus the
/// summaries of every population and the terminal [`Outcome`]. It is built once by
/// [`Evolution::run`] and read afterwards, typically by a pager that moves back and
/// forth through the steps.
///
/// # Example
///
/// ```
/// use oxiqueens_engine::{EvolutionConfig, Run, Seed};
///
/// let run = Run::evolve(EvolutionConfig::default(), Seed::new(625)).unwrap();
/// assert_eq!(run.len(), run.outcome().generations() * 5);
/// assert_eq!(run.get(0).unwrap().title, "Generation #0: Tournament selection");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    seed: Seed,
    config: EvolutionConfig,
    generations: Vec<GenerationSummary>,
    steps: Vec<StepRecord>,
    outcome: Outcome,
}

impl Run {
    /// Validates `config`, then evolves a population from `seed` until termination.
    pub fn evolve(config: EvolutionConfig, seed: Seed) -> Result<Self, ConfigError> {
        Ok(Evolution::new(config, seed)?.run())
    }

    pub(crate) fn new(
        seed: Seed,
        config: EvolutionConfig,
        generations: Vec<GenerationSummary>,
        steps: Vec<StepRecord>,
        outcome: Outcome,
    ) -> Self {
        Self {
            seed,
            config,
            generations,
            steps,
            outcome,
        }
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Returns the summaries of every population, starting with the initial one.
    #[must_use]
    pub fn generations(&self) -> &[GenerationSummary] {
        &self.generations
    }

    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Returns the index of the first step of `generation`, if the run reached it.
    #[must_use]
    pub fn generation_start(&self, generation: usize) -> Option<usize> {
        let index = generation * StepKind::COUNT;
        (index < self.steps.len()).then_some(index)
    }
}
