use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::collector::Candidate;

/// Pick up to `total` candidates at random, at most `per_source` from any one
/// source. The result is ordered newest first.
pub fn sample<R: Rng + ?Sized>(
    mut candidates: Vec<Candidate>,
    total: usize,
    per_source: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    candidates.shuffle(rng);

    let mut selected = Vec::with_capacity(total.min(candidates.len()));
    let mut used: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        if selected.len() >= total {
            break;
        }
        let count = used.entry(candidate.source.clone()).or_insert(0);
        if *count >= per_source {
            continue;
        }
        *count += 1;
        selected.push(candidate);
    }

    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    selected
}
