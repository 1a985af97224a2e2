//! Text-run to structure-item matching.
//!
//! Pairing is greedy over text runs in document order. Each run considers
//! only structure items not already consumed by an earlier run on the same
//! page; table items are never eligible. The similarity heuristic is lexical
//! and tolerant of false negatives: an ambiguous run is left unmatched rather
//! than guessed at.

use crate::content::scanner::TextRun;
use crate::layout::StructureItem;
use std::collections::HashSet;

/// Minimum score a candidate must exceed to be accepted.
const MIN_SCORE: f32 = 0.3;

/// Score granted when the run text starts with the item text's prefix.
const PREFIX_SCORE: f32 = 0.8;

/// Length, in characters, of the item-text prefix used by the prefix rule.
const PREFIX_LEN: usize = 20;

/// Pair runs with structure items.
///
/// Returns one entry per run, in run order: the index of the matched item,
/// or `None`. Each item is consumed by at most one run.
pub fn match_runs(runs: &[TextRun], items: &[StructureItem]) -> Vec<Option<usize>> {
    let mut used: HashSet<usize> = HashSet::new();
    let mut assignments = Vec::with_capacity(runs.len());

    for run in runs {
        let matched = find_best_match(&run.text, items, &used);
        if let Some(index) = matched {
            used.insert(index);
        }
        assignments.push(matched);
    }

    assignments
}

/// Find the best unconsumed structure item for one run's text.
///
/// Scoring, per candidate:
/// 1. case-insensitive exact equality accepts immediately;
/// 2. containment either way scores the word-set overlap ratio;
/// 3. a 20-character prefix match scores at least [`PREFIX_SCORE`];
/// 4. the strictly highest scorer wins if it clears [`MIN_SCORE`].
fn find_best_match(
    run_text: &str,
    items: &[StructureItem],
    used: &HashSet<usize>,
) -> Option<usize> {
    let run_lower = run_text.trim().to_lowercase();
    if run_lower.is_empty() {
        return None;
    }

    let mut best: Option<usize> = None;
    let mut best_score = 0.0_f32;

    for (index, item) in items.iter().enumerate() {
        if used.contains(&index) || item.is_table() {
            continue;
        }
        let item_text = item.text_or_empty().trim();
        if item_text.is_empty() {
            continue;
        }
        let item_lower = item_text.to_lowercase();

        if run_lower == item_lower {
            return Some(index);
        }

        let mut score = 0.0_f32;
        if run_lower.contains(&item_lower) || item_lower.contains(&run_lower) {
            score = word_overlap_ratio(&run_lower, &item_lower);
        }
        if run_lower.starts_with(&prefix(&item_lower, PREFIX_LEN)) {
            score = score.max(PREFIX_SCORE);
        }

        if score > best_score {
            best_score = score;
            best = Some(index);
        }
    }

    if best_score > MIN_SCORE {
        best
    } else {
        None
    }
}

/// Word-set overlap: |intersection| / |larger word set|.
///
/// Words are the distinct whitespace-separated tokens of each string; inputs
/// are already lowercased.
fn word_overlap_ratio(a: &str, b: &str) -> f32 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let larger = words_a.len().max(words_b.len());
    if larger == 0 {
        return 0.0;
    }
    let common = words_a.intersection(&words_b).count();
    common as f32 / larger as f32
}

/// First `len` characters of `text` (char-boundary safe).
fn prefix(text: &str, len: usize) -> String {
    text.chars().take(len).collect()
}
