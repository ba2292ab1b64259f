//! Preload gate and the worker thread blocked on it.
//!
//! The Start button must not run the splash on the task pump (it sleeps for
//! seconds). Instead the click calls [`PreloadGate::request_start`] and a
//! dedicated worker, parked in [`PreloadGate::wait_for_start`], runs one cycle.
//!
//! # Gate States
//!
//! ```text
//!   Idle ──request_start──▶ Triggered ──request_stop──▶ Idle
//!     │                        │
//!     └───────disable──────────┴──────▶ Disabled (terminal)
//! ```
//!
//! `started` and `enabled` live under one mutex and the predicate is checked
//! under that mutex before every wait, so a start request can never be lost.
//!
//! # Shutdown
//!
//! [`PreloadGate::disable`] clears `enabled` first and only then forces a
//! wake-up. A worker that wakes always sees the disabled flag and leaves its
//! loop without running the cycle. [`PreloadWorker`] does disable-then-join in
//! `shutdown()` and on `Drop`.

use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::error::{Result, join_logged, spawn_named};

const THREAD_NAME: &str = "preload";

/// Why [`PreloadGate::wait_for_start`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateSignal {
    /// A start was requested; run one cycle.
    Run,
    /// The gate was disabled; leave the worker loop.
    Shutdown,
}

#[derive(Debug)]
struct GateState {
    started: bool,
    enabled: bool,
}

/// Start/stop signal between a UI event and a blocked worker.
#[derive(Debug)]
pub struct PreloadGate {
    state: Mutex<GateState>,
    wake: Condvar,
}

impl Default for PreloadGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PreloadGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                started: false,
                enabled: true,
            }),
            wake: Condvar::new(),
        }
    }

    /// Trigger one cycle. Idempotent while a cycle is pending or running.
    pub fn request_start(&self) {
        let mut state = self.state.lock();
        state.started = true;
        self.wake.notify_one();
    }

    /// Mark the current cycle as finished. Does not wake anyone.
    pub fn request_stop(&self) {
        self.state.lock().started = false;
    }

    /// Block until a start is requested or the gate is disabled.
    pub fn wait_for_start(&self) -> GateSignal {
        let mut state = self.state.lock();
        while !state.started {
            self.wake.wait(&mut state);
        }
        if state.enabled {
            GateSignal::Run
        } else {
            GateSignal::Shutdown
        }
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.state.lock().started
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    /// Permanently disable the gate and wake the waiter.
    pub fn disable(&self) {
        self.state.lock().enabled = false;
        self.request_start();
    }
}

/// Owns the thread that waits on a [`PreloadGate`].
pub struct PreloadWorker {
    gate: Arc<PreloadGate>,
    handle: Option<JoinHandle<()>>,
}

impl PreloadWorker {
    /// Spawn the worker. `cycle` runs once per start request, on the worker.
    /// It is responsible for calling [`PreloadGate::request_stop`].
    pub fn spawn<F>(
        gate: Arc<PreloadGate>,
        mut cycle: F,
    ) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let worker_gate = gate.clone();
        let handle = spawn_named(THREAD_NAME, move || {
            tracing::debug!("preload worker started");
            while worker_gate.is_enabled() {
                match worker_gate.wait_for_start() {
                    GateSignal::Run => {
                        tracing::info!("preload cycle started");
                        cycle();
                        tracing::info!("preload cycle finished");
                    }
                    GateSignal::Shutdown => break,
                }
            }
            tracing::debug!("preload worker stopped");
        })?;

        Ok(Self {
            gate,
            handle: Some(handle),
        })
    }

    /// Disable the gate, then join the worker. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.gate.disable();
            join_logged(THREAD_NAME, handle);
        }
    }
}

impl Drop for PreloadWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_start_then_wait_returns_run() {
        let gate = Arc::new(PreloadGate::new());
        let waiter = {
            let gate = gate.clone();
            thread::spawn(move || gate.wait_for_start())
        };
        thread::sleep(Duration::from_millis(20));
        gate.request_start();
        assert_eq!(waiter.join().unwrap(), GateSignal::Run);
        assert!(gate.is_started());
    }

    #[test]
    fn test_request_start_is_idempotent() {
        let gate = PreloadGate::new();
        gate.request_start();
        gate.request_start();
        assert!(gate.is_started());
        assert_eq!(gate.wait_for_start(), GateSignal::Run);
    }

    #[test]
    fn test_stop_makes_wait_block_again() {
        let gate = Arc::new(PreloadGate::new());
        gate.request_start();
        assert_eq!(gate.wait_for_start(), GateSignal::Run);
        gate.request_stop();

        let (tx, rx) = crossbeam_channel::bounded(1);
        let waiter = {
            let gate = gate.clone();
            thread::spawn(move || {
                tx.send(gate.wait_for_start()).ok();
            })
        };
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        gate.request_start();
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(GateSignal::Run));
        waiter.join().unwrap();
    }

    #[test]
    fn test_disable_releases_waiter_without_start() {
        let gate = Arc::new(PreloadGate::new());
        let waiter = {
            let gate = gate.clone();
            thread::spawn(move || gate.wait_for_start())
        };
        thread::sleep(Duration::from_millis(20));
        gate.disable();
        assert_eq!(waiter.join().unwrap(), GateSignal::Shutdown);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_worker_runs_one_cycle_per_start() {
        let gate = Arc::new(PreloadGate::new());
        let cycles = Arc::new(AtomicU32::new(0));
        let mut worker = {
            let gate = gate.clone();
            let cycles = cycles.clone();
            PreloadWorker::spawn(gate.clone(), move || {
                cycles.fetch_add(1, Ordering::SeqCst);
                gate.request_stop();
            })
            .unwrap()
        };

        for expected in 1..=3 {
            gate.request_start();
            let deadline = std::time::Instant::now() + Duration::from_secs(2);
            while cycles.load(Ordering::SeqCst) < expected && std::time::Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            assert_eq!(cycles.load(Ordering::SeqCst), expected);
            while gate.is_started() && std::time::Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
        }

        worker.shutdown();
        worker.shutdown();
        assert_eq!(cycles.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_worker_drop_never_started_terminates() {
        let gate = Arc::new(PreloadGate::new());
        let worker = PreloadWorker::spawn(gate.clone(), || {}).unwrap();
        drop(worker);
        assert!(!gate.is_enabled());
    }
}
