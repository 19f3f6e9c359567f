use std::path::PathBuf;

use oxiqueens_engine::{Evolution, GenerationSummary};

use crate::{
    command::{ConfigArg, SeedArg},
    schema::record::RecordedRun,
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RecordArg {
    #[clap(flatten)]
    seed: SeedArg,
    #[clap(flatten)]
    config: ConfigArg,
    /// Output file path (prints to stdout if not specified)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RecordArg) -> anyhow::Result<()> {
    let RecordArg {
        seed,
        config,
        output,
    } = arg;

    let config = config.load()?;
    let seed = seed.acquire(false)?;
    let run = Evolution::new(config, seed)?.run_with_observer(&mut |summary: &GenerationSummary| {
        eprintln!(
            "Generation #{}: best {}, worst {}, average {:.2}",
            summary.index - 1,
            summary.stats.best,
            summary.stats.worst,
            summary.stats.average
        );
    });

    eprintln!();
    eprintln!("Evolution finished");
    eprintln!("  Seed: {}", run.seed());
    eprintln!("  Steps: {}", run.len());
    eprintln!("  Outcome: {}", run.outcome());

    let recording = RecordedRun::new(run);
    util::save_recording(&recording, output.as_deref())?;

    eprintln!();
    eprintln!("Recording saved successfully");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Recorded at: {}", recording.recorded_at);
    Ok(())
}
