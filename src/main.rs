//! Codebreak CLI - Crack a secret code from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use codebreak::{
    schema::{Code, SearchConfig, Strategy},
    search::{CodeRng, GeneticEngine, HillClimber, StopReason},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        return;
    }

    if args.iter().any(|a| a == "--example") {
        print_example_config();
        return;
    }

    // Optional config path, optional secret code.
    let config: SearchConfig = match args.get(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => SearchConfig::default(),
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // A secret passed on the command line is parsed against the
    // configured alphabet; otherwise one is drawn at random.
    let secret = match args.get(2) {
        Some(text) => Code::parse(text, &config.alphabet).unwrap_or_else(|e| {
            eprintln!("Invalid secret code: {}", e);
            std::process::exit(1);
        }),
        None => CodeRng::from_entropy().random_code(&config.alphabet, config.code_length),
    };

    println!("Codebreak");
    println!("=========");
    println!(
        "Alphabet: {} ({} symbols)",
        config
            .alphabet
            .symbols()
            .iter()
            .map(|s| s.to_string())
            .collect::<String>(),
        config.alphabet.len()
    );
    println!("Secret code: {}", secret);
    println!();

    let start = Instant::now();

    match &config.strategy {
        Strategy::Genetic(ga) => {
            println!(
                "Genetic search: population {}, up to {} generations",
                ga.population_size, ga.max_generations
            );
            let mut engine = GeneticEngine::new(&config, secret).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });

            let result = engine.run_with_callback(|snapshot| {
                println!(
                    "  Generation {}: best {} (fitness {:.1})",
                    snapshot.generation, snapshot.best.code, snapshot.best.fitness
                );
            });

            println!();
            match result.stop_reason {
                StopReason::Solved => println!(
                    "Cracked in generation {}: {}",
                    result.generation, result.best.code
                ),
                StopReason::Exhausted => println!(
                    "No solution within {} generations; best {} (fitness {:.1})",
                    result.generation + 1,
                    result.best.code,
                    result.best.fitness
                ),
            }
        }
        Strategy::HillClimb(hc) => {
            println!("Hill climb: up to {} iterations", hc.max_iterations);
            let mut climber = HillClimber::new(&config, secret).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });

            let result = climber.run_with_callback(|snapshot| {
                if snapshot.improved {
                    println!(
                        "  Iteration {}: {} (fitness {:.1})",
                        snapshot.iteration, snapshot.best.code, snapshot.best.fitness
                    );
                }
            });

            println!();
            match result.stop_reason {
                StopReason::Solved => println!(
                    "Cracked at iteration {}: {}",
                    result.iterations, result.best.code
                ),
                StopReason::Exhausted => println!(
                    "No solution within {} iterations; best {} (fitness {:.1})",
                    result.iterations, result.best.code, result.best.fitness
                ),
            }
        }
    }

    println!("Time: {:.2}s", start.elapsed().as_secs_f32());
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [secret]", program);
    eprintln!();
    eprintln!("Crack a secret Mastermind code with an evolutionary search.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to search configuration file (default: built-in)");
    eprintln!("  secret       Secret code such as RGBYO (default: drawn at random)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --example    Print an example configuration and exit");
}

fn print_example_config() {
    let config = SearchConfig::default();
    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example config: {}", e),
    }
}
