use chrono::{DateTime, Utc};
use oxiqueens_engine::Run;
use serde::{Deserialize, Serialize};

/// Finished evolution run saved for later replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedRun {
    /// Timestamp when the recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// The run, including its seed, configuration and every step
    pub run: Run,
}

impl RecordedRun {
    pub fn new(run: Run) -> Self {
        Self {
            recorded_at: Utc::now(),
            run,
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiqueens_engine::{EvolutionConfig, Seed};

    use super::*;

    #[test]
    fn test_recording_round_trip() {
        let config = EvolutionConfig {
            max_generations: 3,
            ..EvolutionConfig::default()
        };
        let recording = RecordedRun::new(Run::evolve(config, Seed::new(625)).unwrap());
        let json = serde_json::to_string_pretty(&recording).unwrap();
        assert!(json.contains("\"recorded_at\""));

        let restored: RecordedRun = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.recorded_at, recording.recorded_at);
        assert_eq!(restored.run.seed(), Seed::new(625));
        assert_eq!(restored.run.len(), recording.run.len());
        assert_eq!(restored.run.outcome(), recording.run.outcome());
    }
}
