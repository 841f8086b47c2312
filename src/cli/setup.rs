//! Runtime setup for the binary: worker pool, logging and crash reports.

use crate::observability::{init_tracing, install_panic_hook};
use tracing::debug;

/// Configure the rayon global thread pool once at startup; `0` uses every core.
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        debug!("Thread pool already configured: {e}");
    }
}

/// Panic hook first, then logging.
pub fn init_runtime(verbosity: u8) {
    install_panic_hook();
    init_tracing(verbosity);
}

