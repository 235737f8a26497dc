//! Single-individual hill-climbing engine.

use log::debug;

use crate::schema::{Alphabet, Code, ConfigError, HillClimbConfig, SearchConfig, Strategy};

use super::engine::{Candidate, StopReason, validate_target};
use super::fitness::fitness;
use super::rng::CodeRng;

/// Read-only view of one hill-climb iteration, handed to the progress
/// callback.
#[derive(Debug)]
pub struct ClimbSnapshot<'a> {
    /// Iteration index; 0 is the initial random code.
    pub iteration: usize,
    /// Current best candidate.
    pub best: &'a Candidate,
    /// Whether this iteration strictly improved on the previous best.
    pub improved: bool,
}

/// Outcome of a hill-climb run.
#[derive(Debug, Clone)]
pub struct ClimbResult {
    /// Best candidate found; equals the target iff the reason is
    /// [`StopReason::Solved`].
    pub best: Candidate,
    /// Iteration at which the run stopped.
    pub iterations: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Greedy local search over a single candidate.
///
/// Every iteration mutates the current best unconditionally and accepts
/// the result only on a strict fitness improvement. No sideways moves,
/// no probabilistic acceptance; the fitness trajectory is non-decreasing
/// by construction.
#[derive(Debug)]
pub struct HillClimber {
    alphabet: Alphabet,
    code_length: usize,
    max_fitness: f32,
    params: HillClimbConfig,
    target: Code,
    rng: CodeRng,
}

impl HillClimber {
    /// Create a climber for the given configuration and target.
    ///
    /// Parameters come from the configured strategy; a config selecting
    /// the genetic algorithm still yields a usable climber with the
    /// default iteration budget. Fails fast on invalid configuration or
    /// a target that does not fit the configured alphabet and length.
    pub fn new(config: &SearchConfig, target: Code) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_target(config, &target)?;

        let params = match &config.strategy {
            Strategy::HillClimb(hc) => *hc,
            Strategy::Genetic(_) => HillClimbConfig::default(),
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
        })
    }

    /// Run to completion, invoking `callback` once per iteration
    /// (including iteration 0, the initial random code).
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> ClimbResult
    where
        F: FnMut(&ClimbSnapshot<'_>),
    {
        let code = self.rng.random_code(&self.alphabet, self.code_length);
        let mut current = Candidate {
            fitness: fitness(&code, &self.target),
            code,
        };
        callback(&ClimbSnapshot {
            iteration: 0,
            best: &current,
            improved: true,
        });
        debug!("initial code {} with fitness {:.1}", current.code, current.fitness);

        if current.fitness == self.max_fitness {
            return ClimbResult {
                best: current,
                iterations: 0,
                stop_reason: StopReason::Solved,
            };
        }

        for iteration in 1..=self.params.max_iterations {
            let code = self.rng.mutate(&current.code, &self.alphabet);
            let candidate_fitness = fitness(&code, &self.target);

            let improved = candidate_fitness > current.fitness;
            if improved {
                current = Candidate {
                    code,
                    fitness: candidate_fitness,
                };
                debug!(
                    "iteration {}: accepted {} with fitness {:.1}",
                    iteration, current.code, current.fitness
                );
            }

            callback(&ClimbSnapshot {
                iteration,
                best: &current,
                improved,
            });

            if current.fitness == self.max_fitness {
                return ClimbResult {
                    best: current,
                    iterations: iteration,
                    stop_reason: StopReason::Solved,
                };
            }
        }

        debug!(
            "exhausted after {} iterations, best fitness {:.1}",
            self.params.max_iterations, current.fitness
        );
        ClimbResult {
            best: current,
            iterations: self.params.max_iterations,
            stop_reason: StopReason::Exhausted,
        }
    }

    /// Run to completion without progress reporting.
    pub fn run(&mut self) -> ClimbResult {
        self.run_with_callback(|_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climb_config(seed: u64, max_iterations: usize) -> SearchConfig {
        SearchConfig {
            strategy: Strategy::HillClimb(HillClimbConfig { max_iterations }),
            random_seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn fitness_trajectory_is_non_decreasing() {
        let config = climb_config(42, 1000);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut climber = HillClimber::new(&config, target).unwrap();

        let mut last = 0.0f32;
        climber.run_with_callback(|snapshot| {
            assert!(
                snapshot.best.fitness >= last,
                "fitness dropped at iteration {}",
                snapshot.iteration
            );
            last = snapshot.best.fitness;
        });
    }

    #[test]
    fn improvements_are_strict() {
        let config = climb_config(11, 1000);
        let target = Code::parse("OYBGR", &config.alphabet).unwrap();
        let mut climber = HillClimber::new(&config, target).unwrap();

        let mut last = -1.0f32;
        climber.run_with_callback(|snapshot| {
            if snapshot.improved {
                assert!(snapshot.best.fitness > last);
            } else {
                assert_eq!(snapshot.best.fitness, last);
            }
            last = snapshot.best.fitness;
        });
    }

    #[test]
    fn solves_with_a_generous_budget() {
        let config = climb_config(7, 50_000);
        let target = Code::parse("GYOCM", &config.alphabet).unwrap();
        let mut climber = HillClimber::new(&config, target.clone()).unwrap();

        let result = climber.run();
        assert_eq!(result.stop_reason, StopReason::Solved);
        assert_eq!(result.best.code, target);
        assert_eq!(result.best.fitness, 5.0);
        assert!(result.iterations <= 50_000);
    }

    #[test]
    fn exhaustion_reports_best_found() {
        let config = climb_config(3, 1);
        let target = Code::parse("RGBYO", &config.alphabet).unwrap();
        let mut climber = HillClimber::new(&config, target).unwrap();

        let result = climber.run();
        if result.stop_reason == StopReason::Exhausted {
            assert_eq!(result.iterations, 1);
            assert!(result.best.fitness < 5.0);
        }
    }

    #[test]
    fn rejects_mismatched_target() {
        let config = climb_config(1, 10);
        let target = Code::parse("RG", &config.alphabet).unwrap();
        assert!(matches!(
            HillClimber::new(&config, target),
            Err(ConfigError::TargetLengthMismatch { .. })
        ));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = climb_config(99, 5000);
        let target = Code::parse("MBCRG", &config.alphabet).unwrap();

        let a = HillClimber::new(&config, target.clone()).unwrap().run();
        let b = HillClimber::new(&config, target).unwrap().run();
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.best.code, b.best.code);
    }
}
