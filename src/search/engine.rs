//! Population-based genetic search engine.

use log::debug;

use crate::schema::{Alphabet, Code, ConfigError, GeneticConfig, SearchConfig, Strategy};

use super::fitness::fitness;
use super::rng::CodeRng;

/// A scored individual in the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The code.
    pub code: Code,
    /// Fitness against the target, recomputed each generation.
    pub fitness: f32,
}

/// Read-only view of one evaluated generation, handed to the progress
/// callback. The engine does no formatting or I/O itself.
#[derive(Debug)]
pub struct GenerationSnapshot<'a> {
    /// Generation index, starting at 0.
    pub generation: usize,
    /// The full scored population of this generation.
    pub population: &'a [Candidate],
    /// Highest-fitness candidate of this generation (first in scan order
    /// on ties).
    pub best: &'a Candidate,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A candidate reached maximum fitness.
    Solved,
    /// The generation or iteration budget ran out. Not an error; the
    /// best candidate found so far is still reported.
    Exhausted,
}

/// Outcome of a genetic search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The target, present only when it was actually found.
    pub solution: Option<Code>,
    /// Best candidate observed across the whole run.
    pub best: Candidate,
    /// Index of the generation being evaluated when the run stopped.
    pub generation: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Genetic algorithm over a population of candidate codes.
///
/// Each generation is evaluated against the target, checked for a
/// perfect candidate, then replaced wholesale: the top `elitism`
/// candidates carry over unchanged, and the remainder are children bred
/// by roulette selection, probabilistic crossover, and gated mutation.
#[derive(Debug)]
pub struct GeneticEngine {
    alphabet: Alphabet,
    code_length: usize,
    max_fitness: f32,
    params: GeneticConfig,
    target: Code,
    rng: CodeRng,
    population: Vec<Candidate>,
    generation: usize,
}

impl GeneticEngine {
    /// Create an engine for the given configuration and target.
    ///
    /// Parameters come from the configured strategy; a config selecting
    /// the hill climb still yields a usable engine with default genetic
    /// parameters. Fails fast on invalid configuration or a target that
    /// does not fit the configured alphabet and length.
    pub fn new(config: &SearchConfig, target: Code) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_target(config, &target)?;

        let params = match &config.strategy {
            Strategy::Genetic(ga) => ga.clone(),
            Strategy::HillClimb(_) => GeneticConfig::default(),
        };
        let rng = match config.random_seed {
            Some(seed) => CodeRng::new(seed),
            None => CodeRng::from_entropy(),
        };

        Ok(Self {
            alphabet: config.alphabet.clone(),
            code_length: config.code_length,
            max_fitness: config.max_fitness(),
            params,
            target,
            rng,
            population: Vec::new(),
            generation: 0,
        })
    }

    /// Run to completion, invoking `callback` with a snapshot of every
    /// evaluated generation.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> SearchResult
    where
        F: FnMut(&GenerationSnapshot<'_>),
    {
        self.initialize();

        loop {
            self.evaluate();

            let best_idx = self.best_index();
            callback(&GenerationSnapshot {
                generation: self.generation,
                population: &self.population,
                best: &self.population[best_idx],
            });
            debug!(
                "generation {}: best fitness {:.1}",
                self.generation, self.population[best_idx].fitness
            );

            // First perfect candidate in scan order wins.
            if let Some(i) = self
                .population
                .iter()
                .position(|c| c.fitness == self.max_fitness)
            {
                let solved = self.population[i].clone();
                debug!("solved at generation {}: {}", self.generation, solved.code);
                return SearchResult {
                    solution: Some(solved.code.clone()),
                    best: solved,
                    generation: self.generation,
                    stop_reason: StopReason::Solved,
                };
            }

            if self.generation + 1 >= self.params.max_generations {
                let best = self.population[best_idx].clone();
                debug!(
                    "exhausted after {} generations, best fitness {:.1}",
                    self.generation + 1,
                    best.fitness
                );
                return SearchResult {
                    solution: None,
                    best,
                    generation: self.generation,
                    stop_reason: StopReason::Exhausted,
                };
            }

            self.step_generation();
            self.generation += 1;
        }
    }

    /// Run to completion without progress reporting.
    pub fn run(&mut self) -> SearchResult {
        self.run_with_callback(|_| {})
    }

    /// Generation 0: independent uniform random codes.
    fn initialize(&mut self) {
        self.generation = 0;
        self.population = (0..self.params.population_size)
            .map(|_| Candidate {
                code: self.rng.random_code(&self.alphabet, self.code_length),
                fitness: 0.0,
            })
            .collect();
    }

    fn evaluate(&mut self) {
        for candidate in &mut self.population {
            candidate.fitness = fitness(&candidate.code, &self.target);
        }
    }

    fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, candidate) in self.population.iter().enumerate() {
            if candidate.fitness > self.population[best].fitness {
                best = i;
            }
        }
        best
    }

    /// Replace the population: elites first, then bred children.
    fn step_generation(&mut self) {
        // Stable descending sort; ties keep their relative order.
        self.population
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let size = self.params.population_size;
        let mut next = Vec::with_capacity(size);
        next.extend(self.population.iter().take(self.params.elitism).cloned());

        while next.len() < size {
            let p1 = self.select_index();
            let p2 = self.select_index();

            let child = if self.rng.chance(self.params.crossover_rate) {
                self.rng.crossover(
                    &self.population[p1].code,
                    &self.population[p2].code,
                    &self.alphabet,
                    self.code_length,
                )
            } else {
                self.population[p1].code.clone()
            };
            let child = self
                .rng
                .maybe_mutate(&child, &self.alphabet, self.params.mutation_rate);

            let child_fitness = fitness(&child, &self.target);
            next.push(Candidate {
                code: child,
                fitness: child_fitness,
            });
        }

        self.population = next;
    }

    /// Roulette-wheel parent selection over the frozen population.
    ///
    /// Fitness is non-negative, so an exactly zero sum means every
    /// candidate scored zero; selection then falls back to a uniform
    /// draw instead of dividing by zero.
    fn select_index(&mut self) -> usize {
        let total: f32 = self.population.iter().map(|c| c.fitness).sum();
        if total == 0.0 {
            return self.rng.pick_index(self.population.len());
        }

        let threshold = self.rng.uniform() * total;
        let mut cumulative = 0.0;
        for (i, candidate) in self.population.iter().enumerate() {
            cumulative += candidate.fitness;
            if cumulative >= threshold {
                return i;
            }
        }
        self.population.len() - 1
    }
}

pub(super) fn validate_target(config: &SearchConfig, target: &Code) -> Result<(), ConfigError> {
    if target.len() != config.code_length {
        return Err(ConfigError::TargetLengthMismatch {
            expected: config.code_length,
            actual: target.len(),
        });
    }
    if let Some(s) = target
        .symbols()
        .iter()
        .find(|s| !config.alphabet.contains(**s))
    {
        return Err(ConfigError::TargetSymbolOutsideAlphabet(*s));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Alphabet;

    fn seeded_config(seed: u64) -> SearchConfig {
        SearchConfig {
            random_seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn finds_the_target_with_default_parameters() {
        let config = seeded_config(42);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target.clone()).unwrap();

        let result = engine.run();
        assert_eq!(result.stop_reason, StopReason::Solved);
        assert_eq!(result.solution, Some(target));
        assert_eq!(result.best.fitness, 5.0);
    }

    #[test]
    fn rejects_mismatched_target_length() {
        let config = seeded_config(1);
        let target = Code::parse("RGB", &config.alphabet).unwrap();
        assert_eq!(
            GeneticEngine::new(&config, target).unwrap_err(),
            ConfigError::TargetLengthMismatch {
                expected: 5,
                actual: 3,
            }
        );
    }

    #[test]
    fn rejects_invalid_configuration_before_running() {
        let config = SearchConfig {
            code_length: 20,
            random_seed: Some(1),
            ..Default::default()
        };
        let target = Code::parse("RGBYO", &Alphabet::default()).unwrap();
        assert!(matches!(
            GeneticEngine::new(&config, target),
            Err(ConfigError::CodeLongerThanAlphabet { .. })
        ));
    }

    #[test]
    fn exhausts_when_budget_is_too_small() {
        let config = SearchConfig {
            strategy: Strategy::Genetic(GeneticConfig {
                population_size: 2,
                max_generations: 1,
                elitism: 1,
                ..Default::default()
            }),
            random_seed: Some(7),
            ..Default::default()
        };
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target).unwrap();

        let result = engine.run();
        assert_eq!(result.stop_reason, StopReason::Exhausted);
        assert!(result.solution.is_none());
        // The best found is still reported.
        assert!(result.best.fitness < 5.0);
    }

    #[test]
    fn elites_carry_over_unmodified() {
        let config = seeded_config(3);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target).unwrap();

        let mut previous_elites: Vec<Candidate> = Vec::new();
        engine.run_with_callback(|snapshot| {
            for elite in &previous_elites {
                assert!(
                    snapshot.population.contains(elite),
                    "elite {} missing from generation {}",
                    elite.code,
                    snapshot.generation
                );
            }
            let mut sorted = snapshot.population.to_vec();
            sorted.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
            previous_elites = sorted.into_iter().take(2).collect();
        });
    }

    #[test]
    fn best_fitness_never_decreases_across_generations() {
        let config = seeded_config(17);
        let target = Code::parse("OYBGR", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target).unwrap();

        let mut best_so_far = 0.0f32;
        engine.run_with_callback(|snapshot| {
            assert!(
                snapshot.best.fitness >= best_so_far,
                "fitness dropped at generation {}",
                snapshot.generation
            );
            best_so_far = snapshot.best.fitness;
        });
    }

    #[test]
    fn snapshot_population_has_configured_size() {
        let config = seeded_config(5);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target).unwrap();

        engine.run_with_callback(|snapshot| {
            assert_eq!(snapshot.population.len(), 10);
        });
    }

    #[test]
    fn zero_fitness_population_selects_uniformly() {
        let config = SearchConfig {
            alphabet: Alphabet::from_chars("RGBYOPCMWK").unwrap(),
            random_seed: Some(9),
            ..Default::default()
        };
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target).unwrap();

        // Population of codes sharing no symbol with the target.
        let zero = Code::parse("PCMWK", &config.alphabet).unwrap();
        engine.population = (0..10)
            .map(|_| Candidate {
                code: zero.clone(),
                fitness: 0.0,
            })
            .collect();

        let mut seen = [false; 10];
        for _ in 0..500 {
            let i = engine.select_index();
            assert!(i < 10);
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s), "uniform fallback skipped an index");
    }

    #[test]
    fn roulette_prefers_fitter_candidates() {
        let config = seeded_config(23);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut engine = GeneticEngine::new(&config, target.clone()).unwrap();

        let weak = Code::parse("PCMGR", &config.alphabet).unwrap();
        engine.population = vec![
            Candidate {
                code: target.clone(),
                fitness: 5.0,
            },
            Candidate {
                code: weak,
                fitness: 0.5,
            },
        ];

        let picks_of_fit = (0..1000).filter(|_| engine.select_index() == 0).count();
        // Expected share is 5.0 / 5.5; allow generous slack.
        assert!(picks_of_fit > 800, "fit candidate picked {picks_of_fit}/1000");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = seeded_config(1234);
        let target = Code::parse("GYOCM", &config.alphabet).unwrap();

        let a = GeneticEngine::new(&config, target.clone()).unwrap().run();
        let b = GeneticEngine::new(&config, target).unwrap().run();
        assert_eq!(a.generation, b.generation);
        assert_eq!(a.solution, b.solution);
    }
}
