//! Random code generation and the variation operators.
//!
//! All randomness flows through [`CodeRng`], a seeded wrapper around
//! [`StdRng`], so a run is deterministic given a fixed seed. The operators
//! never mutate their inputs; each returns a fresh code that keeps the
//! distinctness invariant.

use rand::prelude::*;
use rand::seq::index;

use crate::schema::{Alphabet, Code};

/// Random number generator wrapper for code operations.
#[derive(Debug)]
pub struct CodeRng {
    rng: StdRng,
}

impl CodeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with a random seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw `length` distinct symbols uniformly without replacement.
    ///
    /// Callers guarantee `length <= alphabet.len()`; configuration
    /// validation rejects anything else before an engine is built.
    pub fn random_code(&mut self, alphabet: &Alphabet, length: usize) -> Code {
        debug_assert!(length <= alphabet.len());
        let picked = index::sample(&mut self.rng, alphabet.len(), length);
        Code::from_vec_unchecked(picked.iter().map(|i| alphabet.symbols()[i]).collect())
    }

    /// Mutate a code, coin-flipping between two kinds:
    ///
    /// - swap: exchange the symbols at two distinct positions;
    /// - replace: overwrite one position with a symbol the code does not
    ///   use yet. When the alphabet has no unused symbol left, the code
    ///   comes back unchanged.
    pub fn mutate(&mut self, code: &Code, alphabet: &Alphabet) -> Code {
        let mut next = code.clone();
        if self.rng.gen_bool(0.5) {
            let picked = index::sample(&mut self.rng, next.len(), 2);
            next.symbols_mut().swap(picked.index(0), picked.index(1));
        } else {
            let unused = alphabet.unused_in(code);
            if let Some(&replacement) = unused.choose(&mut self.rng) {
                let i = self.rng.gen_range(0..next.len());
                next.symbols_mut()[i] = replacement;
            }
        }
        next
    }

    /// Mutation as applied by the genetic engine: with probability
    /// `1 - rate` the input comes back unchanged without consuming any
    /// further randomness, otherwise [`mutate`](Self::mutate) runs once.
    pub fn maybe_mutate(&mut self, code: &Code, alphabet: &Alphabet, rate: f32) -> Code {
        if self.rng.r#gen::<f32>() < rate {
            self.mutate(code, alphabet)
        } else {
            code.clone()
        }
    }

    /// Recombine two parents into a child of `length` symbols.
    ///
    /// Each position coin-flips between the parents' symbols; a symbol the
    /// child already holds is skipped. Slots left open after the scan are
    /// filled with unused alphabet symbols in randomized order, so the
    /// operator is deterministic only under a fixed seed.
    pub fn crossover(
        &mut self,
        parent1: &Code,
        parent2: &Code,
        alphabet: &Alphabet,
        length: usize,
    ) -> Code {
        let mut child: Vec<_> = Vec::with_capacity(length);
        for i in 0..length {
            let gene = if self.rng.gen_bool(0.5) {
                parent1.symbols()[i]
            } else {
                parent2.symbols()[i]
            };
            if !child.contains(&gene) {
                child.push(gene);
            }
        }

        let mut leftover: Vec<_> = alphabet
            .symbols()
            .iter()
            .copied()
            .filter(|s| !child.contains(s))
            .collect();
        leftover.shuffle(&mut self.rng);
        child.extend(leftover.into_iter().take(length - child.len()));

        Code::from_vec_unchecked(child)
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform(&mut self) -> f32 {
        self.rng.r#gen()
    }

    /// Bernoulli draw against a probability expressed as `f32`.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.r#gen::<f32>() < probability
    }

    /// Uniform index in `0..n`.
    pub fn pick_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}
