//! Wrong-answer generation for quiz questions.

use crate::sampling::weighted_index;
use crate::types::{Field, Word};
use rand::Rng;
use std::collections::HashSet;

/// Weight favouring candidates whose text length is close to the answer's.
pub fn length_weight(candidate_len: usize, correct_len: usize) -> f64 {
    let diff = candidate_len.abs_diff(correct_len) as f64;
    1.0 / (1.0 + 0.5 * diff)
}

/// Pick up to `count` distractors for `correct` from `pool`.
///
/// Candidates sharing the correct word's key, or whose `field` text is empty
/// or equal to the correct text, are never returned. Draws are weighted by
/// [`length_weight`] and made without replacement by key, so fewer than
/// `count` words come back when the pool runs dry.
pub fn pick_distractors<R: Rng + ?Sized>(
    correct: &Word,
    pool: &[Word],
    field: Field,
    count: usize,
    rng: &mut R,
) -> Vec<Word> {
    let correct_text = correct.text(field);
    let correct_len = correct_text.chars().count();

    let mut candidates: Vec<(&Word, f64)> = pool
        .iter()
        .filter(|w| {
            let text = w.text(field);
            w.key() != correct.key() && !text.is_empty() && text != correct_text
        })
        .map(|w| (w, length_weight(w.text(field).chars().count(), correct_len)))
        .collect();

    let mut used: HashSet<&str> = HashSet::new();
    used.insert(correct.key());
    let mut picked = Vec::with_capacity(count.min(candidates.len()));

    while picked.len() < count {
        candidates.retain(|(w, _)| !used.contains(w.key()));
        let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
        let Some(idx) = weighted_index(&weights, rng) else {
            break;
        };
        let (word, _) = candidates[idx];
        used.insert(word.key());
        picked.push(word.clone());
    }

    picked
}
