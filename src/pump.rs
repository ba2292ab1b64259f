//! Tick and task pump threads that drive the toolkit.
//!
//! - **Tick pump**: advances the toolkit clock by its period every iteration,
//!   whether or not anything is drawn. Animations and the spinner run off it.
//! - **Task pump**: runs the dispatcher step (render queue, toolkit task
//!   handler, event dispatch). The only thread that enters toolkit processing.
//!
//! Both loops check one shared running flag at the top of each iteration. An
//! iteration in flight completes, then the thread exits. Shutdown latency is
//! one period.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::config::TimingConfig;
use crate::error::{Result, join_logged, spawn_named};

const TICK_THREAD: &str = "tick-pump";
const TASK_THREAD: &str = "task-pump";

/// Owns both pump threads.
pub struct UiPump {
    running: Arc<AtomicBool>,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl UiPump {
    /// Start both pumps. `tick` receives the elapsed milliseconds per
    /// iteration. If the task pump cannot be spawned, the tick pump is stopped
    /// again before the error is returned.
    pub fn start<T, K>(
        timing: &TimingConfig,
        mut tick: T,
        mut task: K,
    ) -> Result<Self>
    where
        T: FnMut(u32) + Send + 'static,
        K: FnMut() + Send + 'static,
    {
        let mut pump = Self {
            running: Arc::new(AtomicBool::new(true)),
            handles: Vec::with_capacity(2),
        };

        let running = pump.running.clone();
        let tick_ms = timing.tick_period_ms;
        let tick_period = timing.tick_period();
        let handle = spawn_named(TICK_THREAD, move || {
            while running.load(Ordering::Acquire) {
                tick(tick_ms);
                thread::sleep(tick_period);
            }
        })?;
        pump.handles.push((TICK_THREAD, handle));

        let running = pump.running.clone();
        let task_period = timing.task_period();
        let handle = spawn_named(TASK_THREAD, move || {
            while running.load(Ordering::Acquire) {
                task();
                thread::sleep(task_period);
            }
        })?;
        pump.handles.push((TASK_THREAD, handle));

        tracing::info!(tick_ms, task_ms = timing.task_period_ms, "ui pumps started");
        Ok(pump)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clear the running flag and join both pumps. Idempotent.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        for (name, handle) in self.handles.drain(..) {
            join_logged(name, handle);
        }
    }
}

impl Drop for UiPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
