use super::merger::CandidateSet;
use crate::core::models::candidate::CandidateMetabolite;
use std::cmp::Ordering;

/// Ranks for scores already sorted in descending order.
///
/// A score within `epsilon` of its predecessor shares the predecessor's rank; otherwise the
/// rank is the 1-based position, so ties skip numbers (1, 1, 3 rather than 1, 1, 2).
pub fn assign_ranks(sorted_scores: &[f64], epsilon: f64) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_scores.len());
    for (position, &score) in sorted_scores.iter().enumerate() {
        let rank = match (position, ranks.last()) {
            (0, _) | (_, None) => 1,
            (_, Some(&previous_rank)) => {
                if (sorted_scores[position - 1] - score).abs() <= epsilon {
                    previous_rank
                } else {
                    position + 1
                }
            }
        };
        ranks.push(rank);
    }
    ranks
}

fn by_score_descending(a: &CandidateMetabolite, b: &CandidateMetabolite) -> Ordering {
    // Equal scores fall back to the identity key.
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.key.cmp(&b.key))
}

pub fn rank(candidates: &CandidateSet, epsilon: f64) -> Vec<CandidateMetabolite> {
    let mut ordered: Vec<CandidateMetabolite> = candidates.iter().cloned().collect();
    ordered.sort_by(by_score_descending);

    let scores: Vec<f64> = ordered.iter().map(|c| c.score).collect();
    for (candidate, rank) in ordered.iter_mut().zip(assign_ranks(&scores, epsilon)) {
        candidate.rank = Some(rank);
    }
    ordered
}
