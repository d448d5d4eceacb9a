//! Periodic timer: runs a [`Task`] on a fixed start-to-start interval.
//!
//! The first run happens immediately. After each run the timer waits for the
//! remainder of the interval, so a run that takes 4 s of a 10 s interval is
//! followed by a 6 s pause. A run that overshoots the interval is followed by
//! the next one straight away. Runs never overlap, and neither a failing nor a
//! panicking run stops the timer.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use planthub_domain::error::PlantHubError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Unit of periodic work.
pub trait Task: Send + 'static {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Perform one run. Errors are logged by the timer and never stop it.
    fn run(&mut self) -> impl Future<Output = Result<(), PlantHubError>> + Send;
}

/// Handle on a background task running a [`Task`] periodically.
///
/// Dropping the handle aborts the background task. Use [`PeriodicTimer::stop`]
/// for an orderly stop that waits for an in-flight run to finish.
pub struct PeriodicTimer<T> {
    interval: Duration,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<T>>,
}

impl<T: Task> PeriodicTimer<T> {
    /// Spawn the background loop. Must be called from within a tokio runtime.
    pub fn start(interval: Duration, task: T) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        tracing::debug!(
            task = task.name(),
            interval_secs = interval.as_secs(),
            "periodic timer started"
        );
        let handle = tokio::spawn(run_loop(interval, task, stop_rx));
        Self {
            interval,
            stop_tx,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the background loop is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the timer and hand the task back.
    ///
    /// Waits for an in-flight run to complete. Once this returns no further
    /// run will begin. Calling it again returns `None`.
    pub async fn stop(&mut self) -> Option<T> {
        let handle = self.handle.take()?;
        // the loop may already be gone, in which case nobody listens
        let _ = self.stop_tx.send(true);
        match handle.await {
            Ok(task) => {
                tracing::debug!(task = task.name(), "periodic timer stopped");
                Some(task)
            }
            Err(err) => {
                tracing::error!(%err, "periodic timer task ended abnormally");
                None
            }
        }
    }
}

impl<T> Drop for PeriodicTimer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.stop_tx.send(true);
            handle.abort();
        }
    }
}

async fn run_loop<T: Task>(interval: Duration, mut task: T, mut stop_rx: watch::Receiver<bool>) -> T {
    loop {
        if *stop_rx.borrow() {
            break;
        }
        let started = Instant::now();
        let outcome = AssertUnwindSafe(task.run()).catch_unwind().await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(task = task.name(), %err, "periodic run failed, retrying next interval");
            }
            Err(panic) => {
                tracing::error!(
                    task = task.name(),
                    panic = panic_message(panic.as_ref()),
                    "periodic run panicked, retrying next interval"
                );
            }
        }
        let wait = interval.saturating_sub(started.elapsed());
        tokio::select! {
            biased;
            // also fires when the handle was dropped without a stop signal
            _ = stop_rx.changed() => break,
            () = tokio::time::sleep(wait) => {}
        }
    }
    task
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
