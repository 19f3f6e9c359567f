use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Configuration rejected before a run starts.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display(
        "board size must be between {} and {}, got {size}",
        MIN_BOARD_SIZE,
        MAX_BOARD_SIZE
    )]
    BoardSize { size: usize },
    #[display("population must contain at least two individuals, got {size}")]
    PopulationTooSmall { size: usize },
    #[display("crossover rate must be between 0 and 1, got {rate}")]
    CrossoverRate { rate: f64 },
    #[display("mutation rate must be between 0 and 1, got {rate}")]
    MutationRate { rate: f64 },
    #[display("tournament must draw at least one individual")]
    EmptyTournament,
    #[display("the run must allow at least one generation")]
    NoGenerations,
    #[display("initial population has {actual} individuals, expected {expected}")]
    InitialPopulationSize { expected: usize, actual: usize },
    #[display("initial board #{index} has {actual} columns, expected {expected}")]
    InitialBoardSize {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Parameters of one evolution run.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration:
///
/// ```
/// use oxiqueens_engine::EvolutionConfig;
///
/// let config: EvolutionConfig = serde_json::from_str(r#"{ "mutation_rate": 0.1 }"#).unwrap();
/// assert_eq!(config.mutation_rate, 0.1);
/// assert_eq!(config.population_size, EvolutionConfig::default().population_size);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of columns and rows of each board (N).
    pub board_size: usize,
    /// Number of individuals per generation (P).
    pub population_size: usize,
    /// Probability that a pair of parents is crossed.
    pub crossover_rate: f64,
    /// Probability that an offspring is mutated.
    pub mutation_rate: f64,
    /// Number of individuals drawn, with replacement, for each tournament (k).
    pub tournament_size: usize,
    /// Generation cap; the run stops unsolved after this many generations.
    pub max_generations: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            population_size: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.03,
            tournament_size: 2,
            max_generations: 100,
        }
    }
}

impl EvolutionConfig {
    /// Checks that the configuration describes a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
            });
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::CrossoverRate {
                rate: self.crossover_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate {
                rate: self.mutation_rate,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EvolutionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_degenerate_board() {
        let config = EvolutionConfig {
            board_size: 3,
            ..EvolutionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BoardSize { size: 3 }));

        let config = EvolutionConfig {
            board_size: MAX_BOARD_SIZE + 1,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_population() {
        for size in [0, 1] {
            let config = EvolutionConfig {
                population_size: size,
                ..EvolutionConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::PopulationTooSmall { size })
            );
        }
    }

    #[test]
    fn test_rejects_rates_outside_unit_interval() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let config = EvolutionConfig {
                crossover_rate: rate,
                ..EvolutionConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::CrossoverRate { .. })
            ));

            let config = EvolutionConfig {
                mutation_rate: rate,
                ..EvolutionConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MutationRate { .. })
            ));
        }
    }

    #[test]
    fn test_accepts_rate_bounds() {
        let config = EvolutionConfig {
            crossover_rate: 0.0,
            mutation_rate: 1.0,
            ..EvolutionConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_tournament_and_zero_cap() {
        let config = EvolutionConfig {
            tournament_size: 0,
            ..EvolutionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyTournament));

        let config = EvolutionConfig {
            max_generations: 0,
            ..EvolutionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoGenerations));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::BoardSize { size: 2 }.to_string(),
            "board size must be between 4 and 32, got 2"
        );
        assert_eq!(
            ConfigError::MutationRate { rate: 1.5 }.to_string(),
            "mutation rate must be between 0 and 1, got 1.5"
        );
    }
}
