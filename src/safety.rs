// Safety evaluator
//
// A snapshot is safe when the snake can still reach its own tail, or when the
// head has enough free space around it. A tail that is still growing in place
// only counts when it is more than one step away. The free-space margin is
// generous because late in the game part of the free space gets orphaned by
// the move that is actually taken.

use log::debug;

use crate::autopilot::Autopilot;
use crate::grid::Grid;
use crate::pathfind::PathMode;
use crate::snapshot::{SnapshotId, SnapshotSet};

/// Verdict for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Safety {
    Safe,
    NotSafe,
}

/// Both sub-checks behind a safety verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyReport {
    pub tail_reachable: bool,
    pub free_space: usize,
    pub required: usize,
}

impl SafetyReport {
    pub fn verdict(&self) -> Safety {
        if self.tail_reachable || self.free_space >= self.required {
            Safety::Safe
        } else {
            Safety::NotSafe
        }
    }
}

impl Autopilot {
    /// Runs both safety checks on `snapshot`; neither one short-circuits the other
    pub fn safety_report(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        snapshot: SnapshotId,
        snake_length: usize,
    ) -> SafetyReport {
        let head = boards.head(snapshot).expect("snapshot has no snake");
        let tail = boards.tail(snapshot).expect("snapshot has no snake");

        let tail_path = self.find_path(grid, boards, head, tail, snapshot, PathMode::ToTail);
        let free_space = self.measure_free_space(grid, boards, head, snapshot);

        // A tail that stays put next step cannot be entered straight from the head
        let tail_reachable = tail_path.found()
            && (tail_path.path.len() > 1 || boards.is_free(snapshot, tail));

        SafetyReport {
            tail_reachable,
            free_space,
            required: self.settings.required_free_space(snake_length),
        }
    }

    pub fn check_safety(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        snapshot: SnapshotId,
        snake_length: usize,
    ) -> Safety {
        let report = self.safety_report(grid, boards, snapshot, snake_length);
        let verdict = report.verdict();
        debug!(
            "[Safety][Board {}] tail reachable: {}, free space: {}/{} -> {:?}",
            snapshot.0, report.tail_reachable, report.free_space, report.required, verdict
        );
        verdict
    }
}
