//! Interrupt handling.

use crate::config::ServerAddress;
use std::future::Future;

/// Exit code reported after an interrupt.
pub const INTERRUPT_EXIT_CODE: i32 = 0;

/// Logs the shutdown and hands [`INTERRUPT_EXIT_CODE`] to `exit`.
///
/// In-flight requests are not drained.
pub fn handle_interrupt(address: &ServerAddress, exit: impl FnOnce(i32)) {
    tracing::info!("Exiting from {address}");
    exit(INTERRUPT_EXIT_CODE);
}

/// Resolves when the process receives `SIGINT`.
///
/// # Errors
///
/// Returns the I/O error raised while installing the signal listener.
pub async fn interrupted() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Outcome of racing work against an interrupt.
#[derive(Debug)]
pub enum Interruptible<T> {
    /// The work finished first.
    Completed(T),
    /// The interrupt fired first, or its listener failed.
    Interrupted(std::io::Result<()>),
}

/// Drives `work` until it finishes or `interrupt` resolves.
///
/// The interrupt is polled first so its listener is installed before any
/// work runs.
pub async fn until_interrupted<W, I>(work: W, interrupt: I) -> Interruptible<W::Output>
where
    W: Future,
    I: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        biased;
        signal = interrupt => Interruptible::Interrupted(signal),
        output = work => Interruptible::Completed(output),
    }
}
