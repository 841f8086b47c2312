//! Iterative merging of seed clusters to a fixed point
//!
//! Each pass walks the live clusters in creation order. A cluster still live
//! when its turn comes picks the partner with the strictly greatest linkage
//! above the threshold (earliest-created partner on ties), absorbs it, and
//! the partner's slot is tombstoned. A pass with no merge ends the loop.

use super::arena::{ClusterArena, ClusterId};
use super::linkage::Linkage;
use crate::core::Result;
use serde::Serialize;
use std::ops::ControlFlow;
use tracing::{debug, info_span, trace};

/// State reported at each pass boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeProgress {
    /// 1-based number of the pass that just finished
    pub pass: usize,
    pub merges_in_pass: usize,
    pub active_clusters: usize,
}

/// Totals for one merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub passes: usize,
    pub merges: usize,
    /// Stopped by the caller before reaching the fixed point
    pub interrupted: bool,
}

/// Best partner for `id` among the other live clusters, if one clears the threshold.
pub fn find_best_partner(
    arena: &ClusterArena,
    id: ClusterId,
    linkage: &Linkage<'_>,
) -> Result<Option<(ClusterId, f64)>> {
    let Some(cluster) = arena.get(id) else {
        return Ok(None);
    };

    let mut best: Option<(ClusterId, f64)> = None;
    for (other_id, other) in arena.iter() {
        if other_id == id {
            continue;
        }
        let score = linkage.score(cluster, other)?;
        if score > linkage.threshold() && best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((other_id, score));
        }
    }
    Ok(best)
}

/// Run one pass; returns the number of merges performed.
pub fn merge_pass(arena: &mut ClusterArena, linkage: &Linkage<'_>) -> Result<usize> {
    let mut merges = 0;
    for id in arena.ids() {
        if !arena.is_live(id) {
            continue;
        }
        if let Some((partner, score)) = find_best_partner(arena, id, linkage)? {
            trace!(target_cluster = %id, absorbed = %partner, score, "merging clusters");
            if arena.merge_into(id, partner) {
                merges += 1;
            }
        }
    }
    Ok(merges)
}

/// Merge until a pass makes no merge.
pub fn merge_clusters(arena: &mut ClusterArena, linkage: &Linkage<'_>) -> Result<MergeSummary> {
    merge_clusters_with(arena, linkage, |_| ControlFlow::Continue(()))
}

/// Merge until a pass makes no merge or `control` breaks at a pass boundary.
pub fn merge_clusters_with<F>(
    arena: &mut ClusterArena,
    linkage: &Linkage<'_>,
    mut control: F,
) -> Result<MergeSummary>
where
    F: FnMut(&MergeProgress) -> ControlFlow<()>,
{
    let _span = info_span!("merge_clusters", seeds = arena.len()).entered();
    let mut summary = MergeSummary::default();

    loop {
        let merges_in_pass = merge_pass(arena, linkage)?;
        summary.passes += 1;
        summary.merges += merges_in_pass;

        let progress = MergeProgress {
            pass: summary.passes,
            merges_in_pass,
            active_clusters: arena.len(),
        };
        debug!(
            pass = progress.pass,
            merges = merges_in_pass,
            active = progress.active_clusters,
            "Merge pass complete"
        );

        if merges_in_pass == 0 {
            break;
        }
        if control(&progress).is_break() {
            summary.interrupted = true;
            break;
        }
    }

    Ok(summary)
}
