//! Joins ranked hits back to their text units.

use serde::{Deserialize, Serialize};

use crate::document::TextUnit;

use super::ranker::Hit;

/// Decimal digits kept in serialized scores
pub const SCORE_DECIMALS: i32 = 4;

/// A search result as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub pdf: String,
    pub page: u32,
    pub text: String,
    pub score: f64,
}

/// Round a similarity score to `SCORE_DECIMALS` places.
pub fn round_score(score: f32) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    // 0.0 + folds a rounded -0.0 into 0.0
    (f64::from(score) * factor).round() / factor + 0.0
}

/// Build results in hit order.
///
/// Every hit index must come from ranking `units`.
pub fn assemble(hits: &[Hit], units: &[TextUnit]) -> Vec<RankedResult> {
    hits.iter()
        .map(|hit| {
            let unit = &units[hit.index];
            RankedResult {
                pdf: unit.source_id.clone(),
                page: unit.location,
                text: unit.text.clone(),
                score: round_score(hit.score),
            }
        })
        .collect()
}
