//! Result ranking

use promgrep_core::MatchHit;

/// Sort hits by descending score
///
/// The sort is stable: hits with equal scores keep discovery order.
/// Unscored hits rank below every similarity score.
pub fn rank_hits(hits: &mut [MatchHit]) {
    hits.sort_by(|a, b| b.score.cmp(&a.score));
}
