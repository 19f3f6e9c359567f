use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use oxiqueens_engine::EvolutionConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::schema::record::RecordedRun;

/// Writes `recording` as pretty-printed JSON to `path`, or to stdout without one.
pub(crate) fn save_recording(recording: &RecordedRun, path: Option<&Path>) -> anyhow::Result<()> {
    let seed = recording.run.seed();
    match path {
        Some(path) => {
            log::info!("Saving recording of seed {seed} to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create recording file: {}", path.display()))?;
            write_json(BufWriter::new(file), recording)
                .with_context(|| format!("Failed to save recording to {}", path.display()))
        }
        None => {
            log::info!("Writing recording of seed {seed} to stdout");
            write_json(io::stdout().lock(), recording).context("Failed to write recording to stdout")
        }
    }
}

/// Reads a recording saved by [`save_recording`].
pub(crate) fn load_recording(path: &Path) -> anyhow::Result<RecordedRun> {
    let recording: RecordedRun = read_json(path)
        .with_context(|| format!("Failed to load recording: {}", path.display()))?;
    log::info!(
        "Loaded {} steps of seed {} from {}",
        recording.run.len(),
        recording.run.seed(),
        path.display()
    );
    Ok(recording)
}

/// Reads evolution parameters; missing fields keep their defaults.
pub(crate) fn load_config(path: &Path) -> anyhow::Result<EvolutionConfig> {
    log::info!("Loading evolution configuration from {}", path.display());
    read_json(path).with_context(|| {
        format!(
            "Failed to load evolution configuration: {}",
            path.display()
        )
    })
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T>(path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path).context("Cannot open file")?;
    let value = serde_json::from_reader(BufReader::new(file)).context("Malformed JSON")?;
    Ok(value)
}
