//! Diagnostics sink injected into the aggregation pass.
//!
//! The library never talks to a global logger. Anything that wants to run
//! the aggregator hands it a [`Diagnostics`] implementation, which keeps
//! the duplicate-sample and skipped-file messages capturable in tests. The
//! `cnv-report` binary injects [`TracingSink`] so the messages end up on
//! the same `tracing` subscriber as the rest of the tool's output.

use tracing::debug;
use tracing::info;
use tracing::warn;

/// A sink for the diagnostic messages emitted while aggregating CNV data.
pub trait Diagnostics {
    /// Reports routine progress, such as the number of samples found.
    fn info(&self, message: &str);

    /// Reports detail that is only interesting when debugging a report run,
    /// such as a duplicate sample name being overwritten.
    fn debug(&self, message: &str);

    /// Reports a recoverable problem, such as a malformed input file that
    /// was skipped.
    fn warning(&self, message: &str);
}

/// Forwards diagnostics to the global `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Diagnostics for TracingSink {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn debug(&self, message: &str) {
        debug!("{}", message);
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
    }
}
