//! Render path from state owners to the toolkit.
//!
//! The model and the controller never touch widgets. They queue
//! [`RenderCommand`]s on an unbounded channel; the task pump drains the queue
//! with [`Renderer::apply_pending`] right before it runs the toolkit's task
//! handler. Widget mutation therefore happens on one thread, in the order the
//! state changes were made.
//!
//! # Commands
//!
//! - `Temperature`: gauge needle of the changed field, both chart series
//!   (current only when current changed), alert LED, and for warning changes
//!   the slider position
//! - `Open`: load a screen root and force a redraw
//! - `UncheckSimulate`: clear the Entry checkbox

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::screens::chart::{SERIES_CURRENT, SERIES_WARNING};
use crate::screens::main_screen::{NEEDLE_CURRENT, NEEDLE_WARNING};
use crate::screens::{Screen, ScreenSet};
use crate::temperature::{Field, Reading};
use crate::toolkit::Toolkit;

/// A widget update requested by a state owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    Temperature { reading: Reading, field: Field },
    Open(Screen),
    UncheckSimulate,
}

/// Producer side of the render queue.
pub type RenderSender = Sender<RenderCommand>;

/// Consumer side of the render queue.
pub type RenderQueue = Receiver<RenderCommand>;

/// Create the render queue.
pub fn channel() -> (RenderSender, RenderQueue) {
    crossbeam_channel::unbounded()
}

/// Applies queued commands to the screen widgets. Task pump only.
pub struct Renderer {
    queue: RenderQueue,
    screens: Arc<ScreenSet>,
}

impl Renderer {
    pub fn new(
        queue: RenderQueue,
        screens: Arc<ScreenSet>,
    ) -> Self {
        Self { queue, screens }
    }

    /// Apply everything queued so far. Returns the number of commands applied.
    pub fn apply_pending(
        &self,
        toolkit: &dyn Toolkit,
    ) -> usize {
        let mut applied = 0;
        for command in self.queue.try_iter() {
            self.apply(toolkit, command);
            applied += 1;
        }
        applied
    }

    fn apply(
        &self,
        toolkit: &dyn Toolkit,
        command: RenderCommand,
    ) {
        match command {
            RenderCommand::Temperature { reading, field } => self.show_reading(toolkit, reading, field),
            RenderCommand::Open(screen) => {
                let Some(root) = self.screens.root(screen) else {
                    tracing::warn!(screen = screen.name(), "cannot open missing screen");
                    return;
                };
                toolkit.load_screen(root);
                toolkit.invalidate(root);
                tracing::info!(screen = screen.name(), "screen opened");
            }
            RenderCommand::UncheckSimulate => {
                if let Some(checkbox) = self.screens.entry.simulate {
                    toolkit.set_checked(checkbox, false);
                }
            }
        }
    }

    fn show_reading(
        &self,
        toolkit: &dyn Toolkit,
        reading: Reading,
        field: Field,
    ) {
        let main = &self.screens.main;

        if let Some(chart) = self.screens.chart.chart {
            if field == Field::Current {
                toolkit.push_point(chart, SERIES_CURRENT, reading.current);
            }
            toolkit.push_point(chart, SERIES_WARNING, reading.warning);
        }

        if let Some(gauge) = main.gauge {
            match field {
                Field::Current => toolkit.set_needle(gauge, NEEDLE_CURRENT, reading.current),
                Field::Warning => toolkit.set_needle(gauge, NEEDLE_WARNING, reading.warning),
            }
        }

        if let Some(led) = main.led {
            toolkit.set_led(led, reading.alert);
        }

        if field == Field::Warning {
            if let Some(slider) = main.slider {
                toolkit.set_value(slider, reading.warning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::FramebufferToolkit;

    fn setup() -> (FramebufferToolkit, Arc<ScreenSet>, RenderSender, Renderer) {
        let toolkit = FramebufferToolkit::new(320, 240);
        let screens = Arc::new(ScreenSet::build(&toolkit));
        let (tx, rx) = channel();
        let renderer = Renderer::new(rx, screens.clone());
        (toolkit, screens, tx, renderer)
    }

    fn reading(
        current: i32,
        warning: i32,
    ) -> Reading {
        Reading {
            current,
            warning,
            alert: current > warning,
        }
    }

    #[test]
    fn test_current_reading_updates_gauge_chart_and_led() {
        let (toolkit, screens, tx, renderer) = setup();
        tx.send(RenderCommand::Temperature {
            reading: reading(30, 25),
            field: Field::Current,
        })
        .unwrap();

        assert_eq!(renderer.apply_pending(&toolkit), 1);
        let gauge = screens.main.gauge.unwrap();
        let chart = screens.chart.chart.unwrap();
        assert_eq!(toolkit.needle(gauge, NEEDLE_CURRENT), Some(30));
        assert_eq!(toolkit.series(chart, SERIES_CURRENT), vec![30]);
        assert_eq!(toolkit.series(chart, SERIES_WARNING), vec![25]);
        assert!(toolkit.is_led_on(screens.main.led.unwrap()));
    }

    #[test]
    fn test_warning_reading_moves_slider_without_current_point() {
        let (toolkit, screens, tx, renderer) = setup();
        let slider = screens.main.slider.unwrap();
        toolkit.set_value(slider, 3);
        tx.send(RenderCommand::Temperature {
            reading: reading(20, 10),
            field: Field::Warning,
        })
        .unwrap();

        renderer.apply_pending(&toolkit);
        let chart = screens.chart.chart.unwrap();
        assert_eq!(toolkit.value(slider), Some(10));
        assert_eq!(toolkit.needle(screens.main.gauge.unwrap(), NEEDLE_WARNING), Some(10));
        assert!(toolkit.series(chart, SERIES_CURRENT).is_empty());
        assert_eq!(toolkit.series(chart, SERIES_WARNING), vec![10]);
        assert!(toolkit.is_led_on(screens.main.led.unwrap()));
    }

    #[test]
    fn test_open_loads_screen_root() {
        let (toolkit, screens, tx, renderer) = setup();
        tx.send(RenderCommand::Open(Screen::Chart)).unwrap();
        tx.send(RenderCommand::Open(Screen::Chart)).unwrap();
        assert_eq!(renderer.apply_pending(&toolkit), 2);
        assert_eq!(toolkit.active_screen(), screens.root(Screen::Chart));
    }

    #[test]
    fn test_uncheck_simulate() {
        let (toolkit, screens, tx, renderer) = setup();
        let checkbox = screens.entry.simulate.unwrap();
        toolkit.set_checked(checkbox, true);
        tx.send(RenderCommand::UncheckSimulate).unwrap();
        renderer.apply_pending(&toolkit);
        assert!(!toolkit.is_checked(checkbox));
    }

    #[test]
    fn test_empty_queue_applies_nothing() {
        let (toolkit, _screens, _tx, renderer) = setup();
        assert_eq!(renderer.apply_pending(&toolkit), 0);
    }
}
