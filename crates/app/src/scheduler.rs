//! Scheduler: owns the recorder and controller timers for the lifetime of
//! the process.

use std::time::Duration;

use tokio::sync::Mutex;

use crate::ports::RecorderSchedule;
use crate::timer::{PeriodicTimer, Task};

/// Owns both periodic timers.
///
/// The recorder can be retimed at runtime; the controller runs at a fixed
/// interval. [`Scheduler::shutdown`] stops both, waiting for in-flight runs,
/// so actuators can be released safely afterwards.
pub struct Scheduler<R, C> {
    recorder: Mutex<PeriodicTimer<R>>,
    controller: Mutex<PeriodicTimer<C>>,
}

impl<R: Task, C: Task> Scheduler<R, C> {
    /// Start both timers. Must be called from within a tokio runtime.
    pub fn start(
        recorder: R,
        recorder_interval: Duration,
        controller: C,
        controller_interval: Duration,
    ) -> Self {
        tracing::info!(
            recorder_interval_secs = recorder_interval.as_secs(),
            controller_interval_secs = controller_interval.as_secs(),
            "scheduler started"
        );
        Self {
            recorder: Mutex::new(PeriodicTimer::start(recorder_interval, recorder)),
            controller: Mutex::new(PeriodicTimer::start(controller_interval, controller)),
        }
    }

    pub async fn recorder_interval(&self) -> Duration {
        self.recorder.lock().await.interval()
    }

    /// Whether both timers are still alive.
    pub async fn is_running(&self) -> bool {
        self.recorder.lock().await.is_running() && self.controller.lock().await.is_running()
    }

    /// Stop both timers. Idempotent.
    pub async fn shutdown(&self) {
        let controller = self.controller.lock().await.stop().await;
        let recorder = self.recorder.lock().await.stop().await;
        if controller.is_some() || recorder.is_some() {
            tracing::info!("scheduler stopped");
        }
    }
}

impl<R: Task, C: Task> RecorderSchedule for Scheduler<R, C> {
    async fn reschedule(&self, interval: Duration) -> bool {
        let mut timer = self.recorder.lock().await;
        if timer.interval() == interval && timer.is_running() {
            return true;
        }
        // the old schedule must be gone before the new one starts
        let Some(recorder) = timer.stop().await else {
            return false;
        };
        *timer = PeriodicTimer::start(interval, recorder);
        tracing::info!(interval_secs = interval.as_secs(), "recorder rescheduled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planthub_domain::error::PlantHubError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(Arc<AtomicUsize>);

    impl Task for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        async fn run(&mut self) -> Result<(), PlantHubError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn counters() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)))
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_both_timers_independently() {
        let (recorded, controlled) = counters();
        let scheduler = Scheduler::start(
            Counter(Arc::clone(&recorded)),
            Duration::from_secs(600),
            Counter(Arc::clone(&controlled)),
            Duration::from_secs(60),
        );

        tokio::time::sleep(Duration::from_secs(650)).await;

        assert_eq!(recorded.load(Ordering::SeqCst), 2);
        assert_eq!(controlled.load(Ordering::SeqCst), 11);
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_reschedule_recorder_with_same_task() {
        let (recorded, controlled) = counters();
        let scheduler = Scheduler::start(
            Counter(Arc::clone(&recorded)),
            Duration::from_secs(1800),
            Counter(controlled),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(recorded.load(Ordering::SeqCst), 1);

        assert!(scheduler.reschedule(Duration::from_secs(60)).await);
        assert_eq!(scheduler.recorder_interval().await, Duration::from_secs(60));

        // restart runs immediately, then every minute
        tokio::time::sleep(Duration::from_secs(130)).await;
        assert_eq!(recorded.load(Ordering::SeqCst), 4);
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_everything_on_shutdown() {
        let (recorded, controlled) = counters();
        let scheduler = Scheduler::start(
            Counter(Arc::clone(&recorded)),
            Duration::from_secs(60),
            Counter(Arc::clone(&controlled)),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_secs(5)).await;

        scheduler.shutdown().await;
        let after = (recorded.load(Ordering::SeqCst), controlled.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_secs(600)).await;

        assert!(!scheduler.is_running().await);
        assert_eq!(
            (recorded.load(Ordering::SeqCst), controlled.load(Ordering::SeqCst)),
            after
        );
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_restart_recorder_after_shutdown() {
        let (recorded, controlled) = counters();
        let scheduler = Scheduler::start(
            Counter(Arc::clone(&recorded)),
            Duration::from_secs(60),
            Counter(controlled),
            Duration::from_secs(60),
        );
        scheduler.shutdown().await;

        assert!(!scheduler.reschedule(Duration::from_secs(120)).await);
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(!scheduler.is_running().await);
    }
}
