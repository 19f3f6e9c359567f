//! Genetic algorithm engine for the N-Queens puzzle, recording every step.
//!
//! The crate evolves a population of boards, each holding one queen per column,
//! towards a placement where no two queens attack each other. Every sub-step of
//! every generation is captured as an immutable [`StepRecord`] so that a viewer can
//! page back and forth through the run.
//!
//! - [`core`] - Boards, fitness and fitness statistics
//! - [`engine`] - Configuration, seeds, genetic operators and the evolution state machine
//!
//! Runs are fully determined by their [`Seed`] and [`EvolutionConfig`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
