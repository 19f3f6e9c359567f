use std::path::PathBuf;

use crate::{tui, ui::screens::StepViewerScreen, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_file: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { recording_file } = arg;

    let recording = util::load_recording(recording_file)?;
    eprintln!(
        "Loaded {} steps recorded at {} (seed {})",
        recording.run.len(),
        recording.recorded_at,
        recording.run.seed()
    );

    let mut screen = StepViewerScreen::new(recording_file.display().to_string(), recording.run);
    tui::run(&mut screen)
}
