//! Search configuration types.
//!
//! The configuration is an explicit value handed to the engines rather
//! than process-wide constants, so independent runs stay isolated and
//! tests can construct their own.

use serde::{Deserialize, Serialize};

use super::{Alphabet, Symbol};

/// Top-level configuration for a code search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Symbols codes are drawn from.
    #[serde(default)]
    pub alphabet: Alphabet,
    /// Number of positions in the secret code.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Search strategy to run.
    #[serde(default)]
    pub strategy: Strategy,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl SearchConfig {
    /// The fitness of an exact match: one point per position.
    pub fn max_fitness(&self) -> f32 {
        self.code_length as f32
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            code_length: default_code_length(),
            strategy: Strategy::default(),
            random_seed: None,
        }
    }
}

fn default_code_length() -> usize {
    5
}

/// Search strategy selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Strategy {
    /// Population-based genetic algorithm with roulette selection,
    /// crossover, mutation, and elitism.
    Genetic(GeneticConfig),
    /// Single-individual hill climb: unconditional mutation with greedy
    /// acceptance of strict improvements.
    HillClimb(HillClimbConfig),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Genetic(GeneticConfig::default())
    }
}

/// Genetic algorithm parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Maximum number of generations before giving up.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Probability of producing a child by crossover rather than cloning
    /// the first parent (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f32,
    /// Probability of mutating each child (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Number of best individuals carried into the next generation
    /// unchanged.
    #[serde(default = "default_elitism")]
    pub elitism: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            elitism: default_elitism(),
        }
    }
}

fn default_population_size() -> usize {
    10
}
fn default_max_generations() -> usize {
    1000
}
fn default_crossover_rate() -> f32 {
    0.7
}
fn default_mutation_rate() -> f32 {
    0.2
}
fn default_elitism() -> usize {
    2
}

/// Hill climb parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HillClimbConfig {
    /// Maximum number of mutation attempts before giving up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> usize {
    1000
}

/// Configuration validation errors.
///
/// A code length larger than the alphabet is the one fatal precondition
/// of the whole system; it is rejected here, before any generation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("code length {code_length} exceeds alphabet size {alphabet_size}")]
    CodeLongerThanAlphabet {
        code_length: usize,
        alphabet_size: usize,
    },
    #[error("code length must be at least 2 for swap mutation, got {0}")]
    CodeTooShort(usize),
    #[error("population size must be at least 1, got 0")]
    EmptyPopulation,
    #[error("elitism {elitism} exceeds population size {population_size}")]
    ElitismExceedsPopulation {
        elitism: usize,
        population_size: usize,
    },
    #[error("{name} rate {value} is outside [0, 1]")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[error("target code has {actual} symbols, expected {expected}")]
    TargetLengthMismatch { expected: usize, actual: usize },
    #[error("target symbol '{0}' is not in the alphabet")]
    TargetSymbolOutsideAlphabet(Symbol),
}

impl SearchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length > self.alphabet.len() {
            return Err(ConfigError::CodeLongerThanAlphabet {
                code_length: self.code_length,
                alphabet_size: self.alphabet.len(),
            });
        }
        if self.code_length < 2 {
            return Err(ConfigError::CodeTooShort(self.code_length));
        }

        match &self.strategy {
            Strategy::Genetic(ga) => {
                if ga.population_size == 0 {
                    return Err(ConfigError::EmptyPopulation);
                }
                if ga.elitism > ga.population_size {
                    return Err(ConfigError::ElitismExceedsPopulation {
                        elitism: ga.elitism,
                        population_size: ga.population_size,
                    });
                }
                check_rate("crossover", ga.crossover_rate)?;
                check_rate("mutation", ga.mutation_rate)?;
            }
            Strategy::HillClimb(_) => {}
        }

        Ok(())
    }
}

fn check_rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_fitness(), 5.0);
    }

    #[test]
    fn rejects_code_longer_than_alphabet() {
        let config = SearchConfig {
            code_length: 9,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CodeLongerThanAlphabet {
                code_length: 9,
                alphabet_size: 8,
            })
        );
    }

    #[test]
    fn rejects_code_too_short_for_swap() {
        let config = SearchConfig {
            code_length: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CodeTooShort(1)));
    }

    #[test]
    fn rejects_elitism_larger_than_population() {
        let config = SearchConfig {
            strategy: Strategy::Genetic(GeneticConfig {
                population_size: 2,
                elitism: 3,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ElitismExceedsPopulation { .. })
        ));
    }

    #[test]
    fn rejects_rate_out_of_range() {
        let config = SearchConfig {
            strategy: Strategy::Genetic(GeneticConfig {
                mutation_rate: 1.5,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "mutation",
                ..
            })
        ));
    }

    #[test]
    fn serialization_roundtrip() {
        let config = SearchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code_length, config.code_length);
        match parsed.strategy {
            Strategy::Genetic(ga) => assert_eq!(ga.population_size, 10),
            Strategy::HillClimb(_) => panic!("expected genetic strategy"),
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.code_length, 5);
        assert_eq!(parsed.alphabet.len(), 8);
        assert!(parsed.random_seed.is_none());
    }
}
