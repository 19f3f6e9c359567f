//! The evolution state machine.
//!
//! [`Evolution`] owns the population and the pseudo-random stream of one run and
//! advances through the states of each generation, emitting one [`StepRecord`] per
//! state:
//!
//! ```text
//! INIT ─▶ SELECT ─▶ CROSSOVER_CUT ─▶ CROSSOVER_RESULT ─▶ MUTATE ─▶ NATURAL_SELECTION
//!           ▲                                                              │
//!           └──────────────────────── next generation ◀────────────────────┤
//!                                                                          ▼
//!                                                                     TERMINATED
//! ```
//!
//! Initialization emits no step; its population is summarized as generation
//! summary 0. The run terminates after a natural selection that keeps an optimal
//! board (solved), or after the natural selection of the last allowed generation
//! (exhausted). At least one generation is always processed, even when the initial
//! population already holds a solution.
//!
//! # Random draws
//!
//! All randomness comes from a single [`Pcg32`] stream seeded from the [`Seed`], drawn
//! in a fixed order:
//!
//! 1. **Init**: one row per column for each individual
//! 2. **Select**: `k` indices per tournament, `P` tournaments
//! 3. **Crossover**: one roll per pair, then a cut column when the pair is crossed
//! 4. **Mutate**: one roll per offspring, then a column and a row when mutated
//!
//! Natural selection draws nothing. The same seed and configuration therefore always
//! reproduce the same sequence of steps.
//!
//! # Example
//!
//! ```
//! use oxiqueens_engine::{Evolution, EvolutionConfig, Phase, Seed, StepKind};
//!
//! let mut evolution = Evolution::new(EvolutionConfig::default(), Seed::new(1)).unwrap();
//! assert_eq!(evolution.phase(), Phase::Select);
//!
//! let step = evolution.advance().unwrap();
//! assert_eq!(step.kind, StepKind::Selection);
//! assert_eq!(step.boards.len(), 20);
//! assert_eq!(evolution.phase(), Phase::CrossoverCut);
//! ```

use std::cmp::Reverse;

use rand::Rng as _;
use rand_pcg::Pcg32;

use super::{operators, step::percent};
use crate::{
    AnnotatedBoard, Board, ConfigError, EvolutionConfig, FitnessStats, GenerationSummary,
    Individual, Outcome, Run, Seed, StepKind, StepRecord, Tag,
};

/// State of the evolution state machine: the next step [`Evolution::advance`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Phase {
    Select,
    CrossoverCut,
    CrossoverResult,
    Mutate,
    NaturalSelection,
    Terminated,
}

/// Receives the summary of each population produced by natural selection.
pub trait GenerationObserver {
    fn on_generation(&mut self, summary: &GenerationSummary);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationSummary),
{
    fn on_generation(&mut self, summary: &GenerationSummary) {
        self(summary);
    }
}

/// Evolves a population of boards one step at a time.
#[derive(Debug, Clone)]
pub struct Evolution {
    config: EvolutionConfig,
    seed: Seed,
    rng: Pcg32,
    phase: Phase,
    generation: usize,
    population: Vec<Individual>,
    parents: Vec<Individual>,
    cuts: Vec<Option<usize>>,
    offspring: Vec<Individual>,
    summaries: Vec<GenerationSummary>,
    steps: Vec<StepRecord>,
    outcome: Option<Outcome>,
}

impl Evolution {
    /// Validates `config` and creates a random initial population from `seed`.
    pub fn new(config: EvolutionConfig, seed: Seed) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seed.rng();
        let boards = (0..config.population_size)
            .map(|_| Board::random(&mut rng, config.board_size))
            .collect();
        Ok(Self::start(config, seed, rng, boards))
    }

    /// Validates `config` and starts from the given initial population.
    ///
    /// The seed still drives every later random draw. `boards` must hold exactly
    /// `population_size` boards of `board_size` columns.
    pub fn with_population(
        config: EvolutionConfig,
        seed: Seed,
        boards: Vec<Board>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if boards.len() != config.population_size {
            return Err(ConfigError::InitialPopulationSize {
                expected: config.population_size,
                actual: boards.len(),
            });
        }
        if let Some((index, board)) = boards
            .iter()
            .enumerate()
            .find(|(_, board)| board.size() != config.board_size)
        {
            return Err(ConfigError::InitialBoardSize {
                index,
                expected: config.board_size,
                actual: board.size(),
            });
        }
        Ok(Self::start(config, seed, seed.rng(), boards))
    }

    fn start(config: EvolutionConfig, seed: Seed, rng: Pcg32, boards: Vec<Board>) -> Self {
        let population = boards.into_iter().map(Individual::new).collect::<Vec<_>>();
        let summary = GenerationSummary {
            index: 0,
            stats: stats_of(&population),
        };
        log::debug!(
            "initial population: best {}, worst {}, average {:.2}",
            summary.stats.best,
            summary.stats.worst,
            summary.stats.average
        );
        Self {
            config,
            seed,
            rng,
            phase: Phase::Select,
            generation: 0,
            population,
            parents: vec![],
            cuts: vec![],
            offspring: vec![],
            summaries: vec![summary],
            steps: vec![],
            outcome: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the 0-based index of the generation being processed.
    ///
    /// Once terminated, this is the index of the last processed generation.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the current population.
    ///
    /// It is replaced by the survivors at each natural selection.
    #[must_use]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.phase.is_terminated()
    }

    /// Returns the outcome, once terminated.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns the steps emitted so far.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Executes the current state and returns the step it emitted.
    ///
    /// Returns `None` once the run has terminated.
    pub fn advance(&mut self) -> Option<&StepRecord> {
        let (step, next) = match self.phase {
            Phase::Select => (self.select(), Phase::CrossoverCut),
            Phase::CrossoverCut => (self.crossover_cut(), Phase::CrossoverResult),
            Phase::CrossoverResult => (self.crossover_result(), Phase::Mutate),
            Phase::Mutate => (self.mutate(), Phase::NaturalSelection),
            Phase::NaturalSelection => self.natural_selection(),
            Phase::Terminated => return None,
        };
        log::trace!("emitted step {}: {}", self.steps.len(), step.title);
        self.phase = next;
        self.steps.push(step);
        self.steps.last()
    }

    /// Drives the state machine to termination and returns the finished run.
    #[must_use]
    pub fn run(self) -> Run {
        self.run_with_observer(&mut |_: &GenerationSummary| {})
    }

    /// Like [`Evolution::run`], notifying `observer` after each generation.
    pub fn run_with_observer<O>(mut self, observer: &mut O) -> Run
    where
        O: GenerationObserver + ?Sized,
    {
        let mut notified = self.summaries.len();
        loop {
            self.advance();
            for summary in &self.summaries[notified..] {
                observer.on_generation(summary);
            }
            notified = self.summaries.len();
            if let Some(outcome) = self.outcome.take() {
                return Run::new(self.seed, self.config, self.summaries, self.steps, outcome);
            }
        }
    }

    fn select(&mut self) -> StepRecord {
        let population_size = self.population.len();
        let tournament_size = self.config.tournament_size;
        let mut times = vec![0; population_size];
        self.parents = (0..population_size)
            .map(|_| {
                let winner =
                    operators::tournament_select(&self.population, tournament_size, &mut self.rng);
                times[winner] += 1;
                self.population[winner].clone()
            })
            .collect();

        let distinct = times.iter().filter(|&&t| t > 0).count();
        let boards = self
            .population
            .iter()
            .zip(&times)
            .map(|(individual, &times)| annotate(individual, Tag::Selected { times }))
            .collect();
        let description = format!(
            "{population_size} tournaments of {tournament_size} individuals drawn at random with replacement; \
             the fittest of each tournament becomes a parent.\n\
             {distinct} distinct individuals were selected."
        );
        StepRecord::new(
            self.generation,
            StepKind::Selection,
            description,
            stats_of(&self.population),
            boards,
        )
    }

    fn crossover_cut(&mut self) -> StepRecord {
        let size = self.config.board_size;
        let rate = self.config.crossover_rate;
        self.cuts = (0..self.parents.len() / 2)
            .map(|_| {
                let roll = self.rng.random::<f64>();
                (roll < rate).then(|| operators::random_cut(size, &mut self.rng))
            })
            .collect();

        let mut boards = Vec::with_capacity(self.parents.len());
        for (pair, cut) in self.parents.chunks_exact(2).zip(&self.cuts) {
            let (left, right) = match *cut {
                Some(cut) => (Tag::CutLeft { cut }, Tag::CutRight { cut }),
                None => (Tag::NotCrossed, Tag::NotCrossed),
            };
            boards.push(annotate(&pair[0], left));
            boards.push(annotate(&pair[1], right));
        }
        if let [.., last] = self.parents.as_slice()
            && self.parents.len() % 2 == 1
        {
            boards.push(annotate(last, Tag::Untouched));
        }

        let crossed = self.cuts.iter().flatten().count();
        let mut description = format!(
            "Parents are paired in order and each pair is crossed with probability {}.\n\
             {crossed} of {} pairs are cut at a random column.",
            percent(rate),
            self.cuts.len()
        );
        if self.parents.len() % 2 == 1 {
            description.push_str(" The last parent has no partner and is left untouched.");
        }
        StepRecord::new(
            self.generation,
            StepKind::CrossoverCut,
            description,
            stats_of(&self.parents),
            boards,
        )
    }

    fn crossover_result(&mut self) -> StepRecord {
        let mut offspring = Vec::with_capacity(self.parents.len());
        let mut tags = Vec::with_capacity(self.parents.len());
        for (pair, cut) in self.parents.chunks_exact(2).zip(&self.cuts) {
            if let Some(cut) = *cut {
                let (a, b) = operators::crossover(pair[0].board(), pair[1].board(), cut);
                offspring.extend([Individual::new(a), Individual::new(b)]);
                tags.extend([Tag::ParentA { cut }, Tag::ParentB { cut }]);
            } else {
                offspring.extend_from_slice(pair);
                tags.extend([Tag::NotCrossed, Tag::NotCrossed]);
            }
        }
        if self.parents.len() % 2 == 1
            && let Some(last) = self.parents.last()
        {
            offspring.push(last.clone());
            tags.push(Tag::Untouched);
        }

        let boards = offspring
            .iter()
            .zip(tags)
            .map(|(individual, tag)| annotate(individual, tag))
            .collect();
        let crossed = self.cuts.iter().flatten().count();
        let description = format!(
            "Each child takes the columns left of the cut from one parent and the rest from the other.\n\
             {} children were created from crossed pairs.",
            crossed * 2
        );
        let stats = stats_of(&offspring);
        self.offspring = offspring;
        StepRecord::new(
            self.generation,
            StepKind::CrossoverResult,
            description,
            stats,
            boards,
        )
    }

    fn mutate(&mut self) -> StepRecord {
        let rate = self.config.mutation_rate;
        let mut boards = Vec::with_capacity(self.offspring.len());
        let mut mutated = 0;
        for individual in &mut self.offspring {
            let roll = self.rng.random::<f64>();
            let tag = if roll < rate {
                let mut board = individual.board().clone();
                let mutation = operators::mutate(&mut board, &mut self.rng);
                *individual = Individual::new(board);
                mutated += 1;
                Tag::Mutated {
                    column: mutation.column,
                    previous_row: mutation.previous_row,
                }
            } else {
                Tag::Unchanged
            };
            boards.push(annotate(individual, tag));
        }

        let description = format!(
            "Each offspring is mutated with probability {}: one random queen moves to a random row.\n\
             {mutated} of {} offspring were mutated.",
            percent(rate),
            self.offspring.len()
        );
        StepRecord::new(
            self.generation,
            StepKind::Mutation,
            description,
            stats_of(&self.offspring),
            boards,
        )
    }

    fn natural_selection(&mut self) -> (StepRecord, Phase) {
        let generation = self.generation;
        let population_size = self.config.population_size;
        // Offspring come first so that they win ties against their parents.
        let mut pool = std::mem::take(&mut self.offspring);
        pool.append(&mut self.parents);
        pool.sort_by_key(|individual| Reverse(individual.fitness()));

        let pool_size = pool.len();
        let boards = pool
            .iter()
            .enumerate()
            .map(|(index, individual)| {
                let tag = if index < population_size {
                    Tag::Survivor { rank: index + 1 }
                } else {
                    Tag::Discarded
                };
                annotate(individual, tag)
            })
            .collect();
        pool.truncate(population_size);
        self.population = pool;
        self.cuts.clear();

        let summary = GenerationSummary {
            index: generation + 1,
            stats: stats_of(&self.population),
        };
        log::debug!(
            "generation {generation}: best {}, worst {}, average {:.2}",
            summary.stats.best,
            summary.stats.worst,
            summary.stats.average
        );
        self.summaries.push(summary);

        let mut description = format!(
            "Offspring and parents form a pool of {pool_size} boards ranked by fitness; \
             the {population_size} fittest survive into the next generation.\n"
        );
        let next = if let Some(outcome) = self.terminal_outcome() {
            log::info!("evolution finished: {outcome}");
            description.push_str(&format!("Run {outcome}."));
            self.outcome = Some(outcome);
            Phase::Terminated
        } else {
            description.push_str(&format!(
                "Best fitness {} of {}; evolution continues.",
                summary.stats.best,
                Board::max_fitness(self.config.board_size)
            ));
            self.generation += 1;
            Phase::Select
        };
        let step = StepRecord::new(
            generation,
            StepKind::NaturalSelection,
            description,
            summary.stats,
            boards,
        );
        (step, next)
    }

    /// Decides whether the population that just survived ends the run.
    fn terminal_outcome(&self) -> Option<Outcome> {
        let generations = self.generation + 1;
        let mut solutions = Vec::<Board>::new();
        for individual in self.population.iter().filter(|i| i.is_optimal()) {
            if !solutions.contains(individual.board()) {
                solutions.push(individual.board().clone());
            }
        }
        if !solutions.is_empty() {
            return Some(Outcome::Solved {
                generations,
                solutions,
            });
        }
        if generations < self.config.max_generations {
            return None;
        }
        // Survivors are ranked, so the first one is the fittest.
        let best = self.population.first()?;
        Some(Outcome::Exhausted {
            generations,
            best: best.board().clone(),
        })
    }
}

fn annotate(individual: &Individual, tag: Tag) -> AnnotatedBoard {
    AnnotatedBoard {
        board: individual.board().clone(),
        fitness: individual.fitness(),
        tag,
    }
}

fn stats_of(individuals: &[Individual]) -> FitnessStats {
    FitnessStats::new(individuals.iter().map(Individual::fitness)).unwrap_or_default()
}
