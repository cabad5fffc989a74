mod order;
mod score;

pub use score::MatchTier;

pub(super) use order::{Tolerances, rank_candidates};
pub(super) use score::{TierWeights, best_match};
