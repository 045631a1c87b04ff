//! Run an async computation to completion from synchronous code.
//!
//! The caller may or may not already be inside a tokio runtime. Starting a
//! second runtime on a thread that drives one panics, so when a runtime is
//! detected the computation is moved to a dedicated scoped thread with its own
//! current-thread runtime. Either way the call blocks until the computation
//! finishes and no thread outlives it.
//!
//! # Examples
//!
//! ```
//! use tui_harness::bridge::run_blocking;
//!
//! let value = run_blocking(async { 6 * 7 }).unwrap();
//! assert_eq!(value, 42);
//! ```

use std::future::Future;
use std::panic;
use thiserror::Error;
use tokio::runtime::{Builder, Handle};
use tracing::debug;

/// Failure to set up the execution environment for a computation.
///
/// Errors produced by the computation itself are part of its output and
/// never appear here.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The current-thread runtime could not be built.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The dedicated runtime thread could not be spawned.
    #[error("failed to spawn bridge thread: {0}")]
    Thread(#[source] std::io::Error),
}

/// Returns `true` if the calling thread is inside a tokio runtime context.
#[must_use]
pub fn has_active_runtime() -> bool {
    Handle::try_current().is_ok()
}

/// Blocks on `future` and returns its output.
///
/// Without an active runtime the future runs on a fresh current-thread
/// runtime on the calling thread. With one, it runs on a fresh runtime on a
/// scoped thread that is joined before returning. A panic inside the
/// computation resumes on the caller's thread with its original payload.
///
/// # Errors
///
/// Returns [`BridgeError`] only if the runtime or its thread cannot be
/// created.
///
/// # Examples
///
/// ```
/// use tui_harness::bridge::run_blocking;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// // Already inside a runtime: the computation moves to its own thread.
/// let result: Result<u8, String> = run_blocking(async { Err("boom".to_string()) }).unwrap();
/// assert_eq!(result.unwrap_err(), "boom");
/// # }
/// ```
pub fn run_blocking<F>(future: F) -> Result<F::Output, BridgeError>
where
    F: Future + Send,
    F::Output: Send,
{
    if !has_active_runtime() {
        return block_on_fresh(future);
    }

    debug!("runtime active on calling thread, running on a dedicated thread");
    std::thread::scope(|scope| {
        let worker = std::thread::Builder::new()
            .name("tui-bridge".to_string())
            .spawn_scoped(scope, move || block_on_fresh(future))
            .map_err(BridgeError::Thread)?;

        match worker.join() {
            Ok(output) => output,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

fn block_on_fresh<F: Future>(future: F) -> Result<F::Output, BridgeError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(BridgeError::Runtime)?;
    Ok(runtime.block_on(future))
}
