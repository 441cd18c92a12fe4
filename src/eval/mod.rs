//! Position evaluation (spec.md §4.5). Grounded on the teacher's
//! `static_evaluation::evaluator_trait::Evaluator` + `BasicEvaluator` /
//! `AdvancedEvaluator` split, re-targeted at the square-byte roster.

mod fast;
mod full;
mod phase;

pub use fast::FastEvaluator;
pub use full::FullEvaluator;
pub use phase::Phase;

use crate::board::Board;
use crate::pieces::Color;

/// Returns an integer score from `color`'s point of view: higher is
/// better for `color` (spec.md §4.5).
pub trait Evaluator {
    fn evaluate(&self, board: &Board, color: Color) -> i32;

    /// Called once per root search call, before any node is scored
    /// (spec.md §4.5: "performs phase detection on entry to the search
    /// move, not per node"). The fast evaluator has no phase and ignores
    /// this; the full evaluator caches the result for every leaf.
    fn prepare(&self, _board: &Board) {}

    /// Extra plies added to the search depth once `prepare` has run
    /// (spec.md §4.5: "in endgame, the search depth D is increased by
    /// 2"). Zero unless the evaluator detected an endgame phase.
    fn depth_bonus(&self) -> usize {
        0
    }
}
