//! Thread-local context tracking for crash reports.
//!
//! Records which clustering phase is running and which input file is being
//! clustered. The context is per thread; rayon workers spawned during the
//! distance pass or seed growth report no phase of their own. Merge-pass
//! progress is global and atomic.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static MERGE_PASSES: AtomicUsize = AtomicUsize::new(0);
static ACTIVE_CLUSTERS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<ClusteringContext> = const { RefCell::new(ClusteringContext::new()) };
}

/// Snapshot of what the current thread is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusteringContext {
    pub phase: Option<ClusteringPhase>,
    pub input: Option<PathBuf>,
}

impl ClusteringContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            input: None,
        }
    }
}

/// Major stages of one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusteringPhase {
    /// Reading and tokenizing term/gene input
    InputLoading,
    /// Pairwise scoring and adjacency construction
    DistanceComputation,
    /// Growing one seed per connected term
    SeedGrowth,
    /// Membership filter over grown seeds
    SeedFiltering,
    /// Iterative merge passes
    ClusterMerging,
    /// Rendering reports
    OutputGeneration,
}

impl std::fmt::Display for ClusteringPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputLoading => write!(f, "input_loading"),
            Self::DistanceComputation => write!(f, "distance_computation"),
            Self::SeedGrowth => write!(f, "seed_growth"),
            Self::SeedFiltering => write!(f, "seed_filtering"),
            Self::ClusterMerging => write!(f, "cluster_merging"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: ClusteringContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Enter `phase` until the returned guard drops.
#[must_use]
pub fn set_phase(phase: ClusteringPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Record the input file until the returned guard drops.
#[must_use]
pub fn set_current_input(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().input = Some(path.into());
        ContextGuard { previous }
    })
}

/// Record merge progress; safe from any thread.
pub fn set_merge_progress(passes: usize, active_clusters: usize) {
    MERGE_PASSES.store(passes, Ordering::Relaxed);
    ACTIVE_CLUSTERS.store(active_clusters, Ordering::Relaxed);
}

/// `(passes, active_clusters)` as last recorded.
#[must_use]
pub fn get_merge_progress() -> (usize, usize) {
    (
        MERGE_PASSES.load(Ordering::Relaxed),
        ACTIVE_CLUSTERS.load(Ordering::Relaxed),
    )
}

#[must_use]
pub fn get_current_context() -> ClusteringContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = ClusteringContext::new();
    });
}
