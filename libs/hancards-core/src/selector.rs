//! Weighted next-card selection.
//!
//! Each word gets weight `ceiling - score`, where the ceiling is one above the
//! configured maximum score, independent of the active set. The previously
//! shown word is multiplied by the recency factor.

use crate::config::{ScoringConfig, SelectorConfig};
use crate::sampling::weighted_index;
use crate::score::ScoreTable;
use crate::types::Word;
use rand::Rng;

/// Selection weights for `words`, in order.
pub fn weights(
    words: &[Word],
    scores: &ScoreTable,
    last_index: Option<usize>,
    scoring: &ScoringConfig,
    selector: &SelectorConfig,
) -> Vec<f64> {
    let ceiling = scoring.ceiling();
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let base = ceiling - f64::from(scores.get(word.key(), scoring));
            if Some(i) == last_index {
                base * selector.recency_factor
            } else {
                base
            }
        })
        .collect()
}

/// Pick the index of the next word to show. `None` when `words` is empty.
pub fn select_next<R: Rng + ?Sized>(
    words: &[Word],
    scores: &ScoreTable,
    last_index: Option<usize>,
    scoring: &ScoringConfig,
    selector: &SelectorConfig,
    rng: &mut R,
) -> Option<usize> {
    match words.len() {
        0 => None,
        1 => Some(0),
        len => {
            let weights = weights(words, scores, last_index, scoring, selector);
            let picked = match weighted_index(&weights, rng) {
                Some(picked) => picked,
                None => {
                    tracing::warn!(?weights, "no usable selection weight, falling back to last card");
                    len - 1
                }
            };
            tracing::trace!(picked, ?last_index, "selected next card");
            Some(picked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn words(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| Word::new(format!("단어{i}"), format!("word{i}")))
            .collect()
    }

    fn select(words: &[Word], scores: &ScoreTable, last: Option<usize>, rng: &mut ChaCha8Rng) -> Option<usize> {
        select_next(
            words,
            scores,
            last,
            &ScoringConfig::default(),
            &SelectorConfig::default(),
            rng,
        )
    }

    #[test]
    fn empty_list_has_no_card() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select(&[], &ScoreTable::new(), None, &mut rng), None);
    }

    #[test]
    fn single_word_always_index_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let list = words(1);
        let mut scores = ScoreTable::new();
        scores.set(list[0].key(), 100, &ScoringConfig::default());
        for last in [None, Some(0), Some(5)] {
            for _ in 0..50 {
                assert_eq!(select(&list, &scores, last, &mut rng), Some(0));
            }
        }
    }

    #[test]
    fn weights_use_fixed_ceiling() {
        let list = words(3);
        let scoring = ScoringConfig::default();
        let mut scores = ScoreTable::new();
        scores.set(list[1].key(), 40, &scoring);
        scores.set(list[2].key(), 100, &scoring);

        let w = weights(&list, &scores, Some(1), &scoring, &SelectorConfig::default());
        assert_eq!(w[0], 101.0);
        assert!((w[1] - 6.1).abs() < 1e-9);
        assert_eq!(w[2], 1.0);
    }

    #[test]
    fn default_above_max_keeps_weights_positive() {
        let list = words(2);
        let scoring = ScoringConfig {
            default_score: 150,
            ..ScoringConfig::default()
        };
        let w = weights(&list, &ScoreTable::new(), None, &scoring, &SelectorConfig::default());
        assert_eq!(w, vec![1.0, 1.0]);
    }

    #[test]
    fn unusable_weights_fall_back_to_last_index() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let list = words(3);
        let selector = SelectorConfig {
            recency_factor: f64::NAN,
        };
        let picked = select_next(
            &list,
            &ScoreTable::new(),
            Some(0),
            &ScoringConfig::default(),
            &selector,
            &mut rng,
        );
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn maxed_words_stay_selectable() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let list = words(3);
        let scoring = ScoringConfig::default();
        let scores: ScoreTable = list.iter().map(|w| (w.korean.clone(), 100)).collect();
        let mut seen = [false; 3];
        for _ in 0..2000 {
            seen[select(&list, &scores, None, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3]);
        assert!(scoring.ceiling() > f64::from(scoring.max));
    }

    #[test]
    fn low_scores_surface_more_often() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let list = words(2);
        let scoring = ScoringConfig::default();
        let mut scores = ScoreTable::new();
        scores.set(list[1].key(), 90, &scoring);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[select(&list, &scores, None, &mut rng).unwrap()] += 1;
        }
        assert!(counts[0] > counts[1] * 5, "counts {counts:?}");
    }

    #[test]
    fn repeat_is_suppressed_not_forbidden() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let list = words(4);
        let scores = ScoreTable::new();
        let n = 10_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            counts[select(&list, &scores, Some(0), &mut rng).unwrap()] += 1;
        }
        let repeat = counts[0] as f64;
        let others = (counts[1] + counts[2] + counts[3]) as f64 / 3.0;
        let ratio = repeat / others;
        assert!(counts[0] > 0);
        assert!((0.07..0.13).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn fed_back_selection_covers_all_and_rarely_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let list = vec![
            Word::new("한", "one"),
            Word::new("둘", "two"),
            Word::new("셋", "three"),
        ];
        let scores = ScoreTable::new();
        let mut counts = [0usize; 3];
        let mut repeats = 0;
        let mut last = None;
        for _ in 0..1000 {
            let idx = select(&list, &scores, last, &mut rng).unwrap();
            if Some(idx) == last {
                repeats += 1;
            }
            counts[idx] += 1;
            last = Some(idx);
        }
        assert!(counts.iter().all(|&c| c > 0), "counts {counts:?}");
        assert!(repeats <= 100, "repeats {repeats}");
    }

    #[test]
    fn out_of_range_last_index_is_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let list = words(3);
        for _ in 0..100 {
            let idx = select(&list, &ScoreTable::new(), Some(99), &mut rng).unwrap();
            assert!(idx < 3);
        }
    }
}
