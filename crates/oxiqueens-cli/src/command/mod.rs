use std::{
    io::{self, BufRead as _, IsTerminal as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use chrono::Utc;
use clap::{Parser, Subcommand};
use oxiqueens_engine::{EvolutionConfig, Seed};

use self::{batch::BatchArg, record::RecordArg, replay::ReplayArg, view::ViewArg};
use crate::util;

mod batch;
mod record;
mod replay;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a run and page through its steps
    View(#[clap(flatten)] ViewArg),
    /// Evolve a run and save it as a JSON recording
    #[command(name = "run")]
    Record(#[clap(flatten)] RecordArg),
    /// Page through a saved recording
    Replay(#[clap(flatten)] ReplayArg),
    /// Evolve many runs with consecutive seeds and report the results
    Batch(#[clap(flatten)] BatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::View(ViewArg::default())) {
        Mode::View(arg) => view::run(&arg)?,
        Mode::Record(arg) => record::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Batch(arg) => batch::run(&arg)?,
    }
    Ok(())
}

/// Evolution parameters: defaults, then the configuration file, then individual flags.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// JSON file overriding the default evolution parameters
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of columns and rows of the board
    #[clap(long)]
    board_size: Option<usize>,
    /// Number of individuals per generation
    #[clap(long)]
    population_size: Option<usize>,
    /// Probability that a pair of parents is crossed
    #[clap(long)]
    crossover_rate: Option<f64>,
    /// Probability that an offspring is mutated
    #[clap(long)]
    mutation_rate: Option<f64>,
    /// Number of individuals drawn for each tournament
    #[clap(long)]
    tournament_size: Option<usize>,
    /// Number of generations after which an unsolved run stops
    #[clap(long)]
    max_generations: Option<usize>,
}

impl ConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<EvolutionConfig> {
        let mut config = match &self.config {
            Some(path) => util::load_config(path)?,
            None => EvolutionConfig::default(),
        };
        if let Some(size) = self.board_size {
            config.board_size = size;
        }
        if let Some(size) = self.population_size {
            config.population_size = size;
        }
        if let Some(rate) = self.crossover_rate {
            config.crossover_rate = rate;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(size) = self.tournament_size {
            config.tournament_size = size;
        }
        if let Some(count) = self.max_generations {
            config.max_generations = count;
        }
        config
            .validate()
            .context("Invalid evolution configuration")?;
        Ok(config)
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SeedArg {
    /// Seed of the run: an integer, or any text to hash (defaults to the current time)
    #[clap(long)]
    seed: Option<String>,
}

impl SeedArg {
    /// Returns the seed given on the command line.
    ///
    /// Without one, the user is asked for it when `prompt` is set and stdin is a
    /// terminal; an empty answer, like a missing seed, uses the current time.
    pub(crate) fn acquire(&self, prompt: bool) -> anyhow::Result<Seed> {
        let text = match &self.seed {
            Some(text) => Some(text.clone()),
            None if prompt && io::stdin().is_terminal() => prompt_seed()?,
            None => None,
        };
        let seed = match text {
            Some(text) => text
                .parse::<Seed>()
                .with_context(|| format!("Invalid seed: {text}"))?,
            None => Seed::from_unix_millis(Utc::now().timestamp_millis()),
        };
        log::info!("Using seed {seed}");
        Ok(seed)
    }
}

fn prompt_seed() -> anyhow::Result<Option<String>> {
    eprint!("Seed (empty for current time): ");
    io::stderr().flush().context("Failed to flush prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read seed from stdin")?;
    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_owned()))
}
