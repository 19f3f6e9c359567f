use oxiqueens_engine::{Outcome, Run, Seed};

use crate::command::ConfigArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    /// Number of runs to evolve
    #[clap(long, default_value_t = 50)]
    runs: u64,
    /// Seed of the first run; later runs use the following integers
    #[clap(long, default_value_t = 0)]
    first_seed: u64,
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let BatchArg {
        runs,
        first_seed,
        config,
    } = arg;

    let config = config.load()?;
    log::info!("Evolving {runs} runs from seed {first_seed}");

    let mut solved = Vec::new();
    for i in 0..*runs {
        let seed = Seed::new(first_seed.wrapping_add(i));
        let run = Run::evolve(config.clone(), seed)?;
        print!("{:02}. [seed {seed}] ", i + 1);
        match run.outcome() {
            Outcome::Solved {
                generations,
                solutions,
            } => {
                let solutions = solutions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Solution {solutions} found in generation {generations}");
                solved.push(*generations);
            }
            Outcome::Exhausted { best, .. } => {
                println!(
                    "Generations exhausted, best board {best} with fitness {}",
                    best.fitness()
                );
            }
        }
    }

    println!();
    println!("Solved: {}/{runs}", solved.len());
    if let Some(mean) = mean(&solved) {
        println!("Mean generations to solve: {mean:.2}");
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}
