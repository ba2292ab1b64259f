//! Desktop simulator for the temperature panel.
//!
//! Opens an SDL window at 2x scale and runs the [`Panel`] on a
//! [`FramebufferToolkit`]. The main thread is the display and input driver
//! only: it feeds mouse samples to the toolkit and copies the last rendered
//! frame into the window. Everything else happens on the panel's threads.
//!
//! Logging goes to stdout through `tracing-subscriber`; set `RUST_LOG` to
//! change the level (default `info`).
//!
//! # Controls
//!
//! - Left mouse button: touch
//! - Close the window to shut the panel down

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use thermo_panel::config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH};
use thermo_panel::{FramebufferToolkit, Panel, TimingConfig, Toolkit};

fn init_logging() {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn main() {
    init_logging();

    let toolkit = Arc::new(FramebufferToolkit::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let dyn_toolkit: Arc<dyn Toolkit> = toolkit.clone();
    let mut panel = match Panel::new(dyn_toolkit, TimingConfig::default()) {
        Ok(panel) => panel,
        Err(err) => {
            tracing::error!("cannot start panel: {err}");
            std::process::exit(1);
        }
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Thermo Panel", &output_settings);
    window.update(&display);

    let area = display.bounding_box();
    let mut pressed = false;

    'running: loop {
        let frame_start = Instant::now();

        // ======================================================================
        // Input
        // ======================================================================

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    toolkit.pointer(point, true);
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    pressed = false;
                    toolkit.pointer(point, false);
                }
                // Drag only matters for the slider
                SimulatorEvent::MouseMove { point } if pressed => toolkit.pointer(point, true),
                _ => {}
            }
        }

        // ======================================================================
        // Output
        // ======================================================================

        toolkit.with_framebuffer(|fb| display.fill_contiguous(&area, fb.pixels().iter().copied()).ok());
        window.update(&display);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    panel.shutdown();
}
