//! Evolution engine: configuration, genetic operators and the step-by-step run.
//!
//! - [`EvolutionConfig`] - Parameters of a run, validated before it starts
//! - [`Seed`] - Seed of the pseudo-random stream, parsed from any user text
//! - [`Individual`] - A board with its cached fitness
//! - [`operators`] - Tournament selection, single-point crossover and mutation
//! - [`Evolution`] - The state machine emitting one [`StepRecord`] per sub-step
//! - [`Run`] - The finalized sequence of steps and its [`Outcome`]
//!
//! # Example
//!
//! ```
//! use oxiqueens_engine::{EvolutionConfig, Outcome, Run, Seed};
//!
//! let config = EvolutionConfig {
//!     population_size: 30,
//!     ..EvolutionConfig::default()
//! };
//! let run = Run::evolve(config, Seed::new(206)).unwrap();
//!
//! for step in run.steps() {
//!     println!("{}: best fitness {}", step.title, step.stats.best);
//! }
//! match run.outcome() {
//!     Outcome::Solved { solutions, .. } => println!("found {}", solutions[0]),
//!     Outcome::Exhausted { best, .. } => println!("best attempt {best}"),
//! }
//! ```

pub use self::{config::*, evolution::*, individual::*, run::*, seed::*, step::*};

mod config;
mod evolution;
mod individual;
pub mod operators;
mod run;
mod seed;
mod step;
