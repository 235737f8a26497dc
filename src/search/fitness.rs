//! Fitness evaluation against the target code.

use crate::schema::Code;

/// Score a candidate against the target.
///
/// One point per symbol in the correct position, half a point per symbol
/// that is present in both codes but misplaced. The maximum, one point
/// per position, is reached exactly when `candidate` equals `target`
/// element-wise (codes carry no repeated symbols, so the shared-symbol
/// count can only reach full length on an exact match).
///
/// This is a proxy score computed directly against the known target, not
/// the black/white peg feedback of a real game.
pub fn fitness(candidate: &Code, target: &Code) -> f32 {
    let exact = candidate
        .symbols()
        .iter()
        .zip(target.symbols())
        .filter(|(a, b)| a == b)
        .count();
    let shared = candidate
        .symbols()
        .iter()
        .filter(|s| target.contains(**s))
        .count();
    let misplaced = shared - exact;
    exact as f32 + misplaced as f32 * 0.5
}
