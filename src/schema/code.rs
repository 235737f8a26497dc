//! Symbol, alphabet, and code types for the Mastermind model.
//!
//! A code is a fixed-length sequence of pairwise-distinct symbols drawn
//! from a finite alphabet. Every operator in the crate preserves that
//! distinctness invariant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single peg color, identified by one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub char);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from building alphabets or parsing codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    /// The alphabet lists the same symbol twice.
    #[error("alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(Symbol),
    /// A code uses a symbol outside the alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(Symbol),
    /// A code repeats a symbol.
    #[error("symbol '{0}' appears more than once")]
    RepeatedSymbol(Symbol),
    /// An alphabet must have at least one symbol.
    #[error("alphabet is empty")]
    EmptyAlphabet,
}

/// An ordered, duplicate-free set of symbols codes are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Create an alphabet, rejecting duplicates.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, CodeError> {
        if symbols.is_empty() {
            return Err(CodeError::EmptyAlphabet);
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(CodeError::DuplicateSymbol(*s));
            }
        }
        Ok(Self { symbols })
    }

    /// Build an alphabet from one character per symbol.
    pub fn from_chars(chars: &str) -> Result<Self, CodeError> {
        Self::new(chars.chars().map(Symbol).collect())
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols. Construction forbids this,
    /// so this exists only to satisfy the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols, in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Whether `symbol` belongs to this alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Symbols of this alphabet not present in `code`, in declaration order.
    pub fn unused_in(&self, code: &Code) -> Vec<Symbol> {
        self.symbols
            .iter()
            .copied()
            .filter(|s| !code.contains(*s))
            .collect()
    }
}

impl Default for Alphabet {
    /// The classic eight-color peg set: red, green, blue, yellow, orange,
    /// purple, cyan, magenta.
    fn default() -> Self {
        Self {
            symbols: "RGBYOPCM".chars().map(Symbol).collect(),
        }
    }
}

impl TryFrom<Vec<Symbol>> for Alphabet {
    type Error = CodeError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<Alphabet> for Vec<Symbol> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}

/// A candidate or secret code: an ordered sequence of distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<Symbol>);

impl Code {
    /// Build a code from symbols, checking alphabet membership and
    /// distinctness. Length against the configured code size is checked
    /// by the engines, which know the configuration.
    pub fn from_symbols(symbols: Vec<Symbol>, alphabet: &Alphabet) -> Result<Self, CodeError> {
        for (i, s) in symbols.iter().enumerate() {
            if !alphabet.contains(*s) {
                return Err(CodeError::UnknownSymbol(*s));
            }
            if symbols[..i].contains(s) {
                return Err(CodeError::RepeatedSymbol(*s));
            }
        }
        Ok(Self(symbols))
    }

    /// Parse a code from compact text such as `RGBYO`.
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self, CodeError> {
        Self::from_symbols(text.chars().map(Symbol).collect(), alphabet)
    }

    /// Construct from symbols the caller already knows are distinct.
    /// Used by the operators, which preserve the invariant structurally.
    pub(crate) fn from_vec_unchecked(symbols: Vec<Symbol>) -> Self {
        debug_assert!(
            symbols
                .iter()
                .enumerate()
                .all(|(i, s)| !symbols[..i].contains(s)),
            "code symbols must be distinct"
        );
        Self(symbols)
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the code has no positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The symbols, left to right.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Whether `symbol` occurs anywhere in this code.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut [Symbol] {
        &mut self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}
