//! Background temperature simulator.
//!
//! While simulation is active, the current temperature ramps as a triangular
//! wave: up by `SIMULATION_STEP` per period until `MAX_TEMP`, then down to 0,
//! then up again. While inactive, the wave is reset to its start and the
//! model is left alone, so the current temperature belongs to the UI thread.
//!
//! The thread polls a stop flag once per period; there is no wake-up signal,
//! so shutdown takes at most one period.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::{MAX_TEMP, SIMULATION_STEP};
use crate::error::{Result, join_logged, spawn_named};
use crate::temperature::TemperatureModel;

const THREAD_NAME: &str = "temperature-sim";

/// Bounded triangular wave over `[0, MAX_TEMP]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangleWave {
    value: i32,
    direction: i32,
}

impl Default for TriangleWave {
    fn default() -> Self {
        Self { value: 0, direction: 1 }
    }
}

impl TriangleWave {
    /// Step once and return the new value. Reverses at `MAX_TEMP` and at 0.
    pub fn advance(&mut self) -> i32 {
        self.value += self.direction * SIMULATION_STEP;
        if self.value >= MAX_TEMP {
            self.value = MAX_TEMP;
            self.direction = -1;
        } else if self.value <= 0 {
            self.value = 0;
            self.direction = 1;
        }
        self.value
    }

    /// Back to (0, rising).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One simulator iteration, separated from the thread for deterministic use.
pub struct Simulation {
    model: Arc<TemperatureModel>,
    wave: TriangleWave,
}

impl Simulation {
    pub fn new(model: Arc<TemperatureModel>) -> Self {
        Self {
            model,
            wave: TriangleWave::default(),
        }
    }

    /// Run one period: advance and publish if active, reset the wave
    /// otherwise. Returns the value written, if any.
    pub fn tick(&mut self) -> Option<i32> {
        if self.model.is_simulate_active() {
            let value = self.wave.advance();
            self.model.set_current(value);
            Some(value)
        } else {
            self.wave.reset();
            None
        }
    }

    #[inline]
    pub const fn wave(&self) -> TriangleWave {
        self.wave
    }
}

/// Owns the simulator thread.
pub struct TemperatureSimulator {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TemperatureSimulator {
    /// Start the simulator thread with the given period.
    pub fn spawn(
        model: Arc<TemperatureModel>,
        period: Duration,
    ) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let mut simulation = Simulation::new(model);

        let handle = spawn_named(THREAD_NAME, move || {
            tracing::debug!(period_ms = period.as_millis() as u64, "temperature simulator started");
            while flag.load(Ordering::Acquire) {
                simulation.tick();
                thread::sleep(period);
            }
            tracing::debug!("temperature simulator stopped");
        })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Clear the flag and join. Idempotent.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            join_logged(THREAD_NAME, handle);
        }
    }
}

impl Drop for TemperatureSimulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
