//! Observability: log setup, phase tracking and crash reports.
//!
//! Install the panic hook and the subscriber at startup:
//!
//! ```ignore
//! use richcluster::observability::{init_tracing, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(1);
//! }
//! ```
//!
//! The engine marks each pipeline phase so a crash report names it:
//!
//! ```ignore
//! let _phase = set_phase(ClusteringPhase::SeedGrowth);
//! ```

pub mod context;
pub mod panic_hook;
pub mod logging;

pub use context::{
    get_current_context, get_merge_progress, set_current_input, set_merge_progress, set_phase,
    ClusteringContext, ClusteringPhase, ContextGuard,
};
pub use panic_hook::install_panic_hook;
pub use logging::{default_filter, init_tracing};
