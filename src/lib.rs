//! Evolutionary solver for the Mastermind code-breaking puzzle.
//!
//! The hidden code is a fixed-length sequence of distinct symbols drawn
//! from a finite alphabet. Two strategies search for it over one shared
//! foundation of code types, fitness scoring, and variation operators:
//!
//! - a genetic algorithm evolving a whole population with roulette
//!   selection, crossover, mutation, and elitism;
//! - a hill climber mutating a single candidate and keeping only strict
//!   improvements.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: alphabet, code, and configuration types
//! - `search`: fitness, operators, and the two engines
//!
//! # Example
//!
//! ```rust,no_run
//! use codebreak::schema::{Code, SearchConfig};
//! use codebreak::search::GeneticEngine;
//!
//! let config = SearchConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//! let target = Code::parse("RGBYO", &config.alphabet).unwrap();
//!
//! let mut engine = GeneticEngine::new(&config, target).unwrap();
//! let result = engine.run();
//!
//! println!(
//!     "stopped at generation {} with best {}",
//!     result.generation, result.best.code
//! );
//! ```
//!
//! Fitness grades a candidate with one point per symbol in the right
//! position and half a point per symbol that is present but misplaced;
//! the engines know the target, so this simulates an omniscient solver
//! rather than a feedback-limited player.

pub mod schema;
pub mod search;

// Re-export commonly used types
pub use schema::{Alphabet, Code, SearchConfig, Strategy};
pub use search::{GeneticEngine, HillClimber, StopReason};
