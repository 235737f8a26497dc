//! Evolutionary search engines for cracking a hidden code.
//!
//! The search system consists of:
//!
//! - **Fitness** (`fitness`): graded scoring of a candidate against the
//!   target
//! - **Operators** (`rng`): seeded random code generation, mutation, and
//!   crossover
//! - **Genetic engine** (`engine`): population loop with roulette
//!   selection, crossover, mutation, and elitism
//! - **Hill climber** (`climb`): single-individual greedy local search
//!
//! # Example
//!
//! ```rust,no_run
//! use codebreak::schema::{Code, SearchConfig};
//! use codebreak::search::GeneticEngine;
//!
//! let config = SearchConfig::default();
//! let target = Code::parse("RGBYO", &config.alphabet).unwrap();
//!
//! let mut engine = GeneticEngine::new(&config, target).unwrap();
//! let result = engine.run_with_callback(|snapshot| {
//!     println!(
//!         "generation {}: best {} (fitness {:.1})",
//!         snapshot.generation, snapshot.best.code, snapshot.best.fitness
//!     );
//! });
//!
//! match result.solution {
//!     Some(code) => println!("cracked: {code}"),
//!     None => println!("not found; best was {}", result.best.code),
//! }
//! ```

mod climb;
mod engine;
mod fitness;
mod rng;

pub use climb::{ClimbResult, ClimbSnapshot, HillClimber};
pub use engine::{Candidate, GenerationSnapshot, GeneticEngine, SearchResult, StopReason};
pub use fitness::fitness;
pub use rng::CodeRng;
