use oxiqueens_engine::Run;

use crate::{
    command::{ConfigArg, SeedArg},
    tui,
    ui::screens::StepViewerScreen,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ViewArg {
    #[clap(flatten)]
    seed: SeedArg,
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &ViewArg) -> anyhow::Result<()> {
    let ViewArg { seed, config } = arg;

    let config = config.load()?;
    let seed = seed.acquire(true)?;
    let run = Run::evolve(config, seed)?;
    log::info!("Evolved {} steps, {}", run.len(), run.outcome());

    let mut screen = StepViewerScreen::new(format!("seed {seed}"), run);
    tui::run(&mut screen)
}
