//! Data model and configuration types.

mod code;
mod config;

pub use code::{Alphabet, Code, CodeError, Symbol};
pub use config::{
    ConfigError, GeneticConfig, HillClimbConfig, SearchConfig, Strategy,
};
