//! Inverse-CDF sampling over discrete weights.

use rand::Rng;

/// Draw an index with probability proportional to its weight.
///
/// Returns `None` for an empty slice or a non-positive total. Floating-point
/// residue after the full pass falls back to the last index.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || !total.is_finite() || total <= 0.0 {
        return None;
    }

    let mut r = rng.gen::<f64>() * total;
    for (i, weight) in weights.iter().enumerate() {
        r -= weight;
        if r <= 0.0 {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}
