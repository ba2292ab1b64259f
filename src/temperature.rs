//! Shared temperature state.
//!
//! [`TemperatureModel`] owns the current and warning temperatures and the
//! simulate flag. It is written by the navigation controller (slider, resets)
//! and by the simulator thread, and read by everyone.
//!
//! Every write is clamped to `[0, MAX_TEMP]` and immediately published on the
//! render path as a [`Reading`]. The alert flag is never stored: it is derived
//! from the two temperatures whenever a reading is taken.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::config::{DEFAULT_CURRENT_TEMP, DEFAULT_WARNING_TEMP, MAX_TEMP};
use crate::render::{RenderCommand, RenderSender};

/// Clamp a temperature into `[0, MAX_TEMP]`.
#[inline]
pub const fn clamp_temp(value: i32) -> i32 {
    if value < 0 {
        0
    } else if value > MAX_TEMP {
        MAX_TEMP
    } else {
        value
    }
}

/// Which temperature a published reading was triggered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Current,
    Warning,
}

/// Consistent snapshot of both temperatures and the derived alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub current: i32,
    pub warning: i32,
    pub alert: bool,
}

impl Reading {
    const fn new(
        current: i32,
        warning: i32,
    ) -> Self {
        Self {
            current,
            warning,
            alert: current > warning,
        }
    }
}

#[derive(Debug)]
struct Temperatures {
    current: i32,
    warning: i32,
}

/// Current/warning temperature pair plus the simulate flag.
pub struct TemperatureModel {
    temps: Mutex<Temperatures>,
    simulate: AtomicBool,
    render: RenderSender,
}

impl TemperatureModel {
    /// Model with default temperatures and simulation off.
    pub fn new(render: RenderSender) -> Self {
        Self {
            temps: Mutex::new(Temperatures {
                current: DEFAULT_CURRENT_TEMP,
                warning: DEFAULT_WARNING_TEMP,
            }),
            simulate: AtomicBool::new(false),
            render,
        }
    }

    /// Store a new current temperature and publish it.
    pub fn set_current(
        &self,
        value: i32,
    ) {
        let mut temps = self.temps.lock();
        temps.current = clamp_temp(value);
        // Publish under the lock so readings reach the renderer in write order
        self.publish(Reading::new(temps.current, temps.warning), Field::Current);
    }

    /// Store a new warning threshold and publish it. The slider is
    /// re-rendered even if the value did not change.
    pub fn set_warning(
        &self,
        value: i32,
    ) {
        let mut temps = self.temps.lock();
        temps.warning = clamp_temp(value);
        self.publish(Reading::new(temps.current, temps.warning), Field::Warning);
    }

    /// Restore the start-up temperatures.
    pub fn reset_to_defaults(&self) {
        self.set_current(DEFAULT_CURRENT_TEMP);
        self.set_warning(DEFAULT_WARNING_TEMP);
    }

    #[inline]
    pub fn current(&self) -> i32 {
        self.temps.lock().current
    }

    #[inline]
    pub fn warning(&self) -> i32 {
        self.temps.lock().warning
    }

    /// `current > warning`, computed from the stored values.
    #[inline]
    pub fn alert(&self) -> bool {
        self.snapshot().alert
    }

    /// Both temperatures read under one lock.
    pub fn snapshot(&self) -> Reading {
        let temps = self.temps.lock();
        Reading::new(temps.current, temps.warning)
    }

    #[inline]
    pub fn is_simulate_active(&self) -> bool {
        self.simulate.load(Ordering::Relaxed)
    }

    pub fn set_simulate_active(
        &self,
        active: bool,
    ) {
        tracing::debug!(active, "simulate flag changed");
        self.simulate.store(active, Ordering::Relaxed);
    }

    fn publish(
        &self,
        reading: Reading,
        field: Field,
    ) {
        // The receiver is gone only during teardown; nothing left to render
        self.render.send(RenderCommand::Temperature { reading, field }).ok();
    }
}
