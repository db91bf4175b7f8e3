//! Ctrl-C handling for command-line runs

use std::future::Future;

/// Exit status after an interrupt (128 + SIGINT)
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Drive `task` to completion unless `interrupt` resolves first
///
/// Returns `None` when interrupted; the task is dropped at its current await
/// point.
pub async fn until_interrupted<T, I>(task: impl Future<Output = T>, interrupt: I) -> Option<T>
where
    I: Future,
{
    tokio::select! {
        output = task => Some(output),
        _ = interrupt => None,
    }
}
