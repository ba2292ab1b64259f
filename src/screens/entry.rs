//! Entry screen and the preload splash shown on it.
//!
//! # Visual Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │            THERMO PANEL            │  Headline
//! │      [ ] Simulate temperature      │  Checkbox
//! │                                    │
//! │             [ Start ]              │  Button (spinner while preloading)
//! │                                    │
//! │                     3              │  Countdown (preload only)
//! └────────────────────────────────────┘
//! ```
//!
//! # Preload Splash
//!
//! Runs on the preload worker thread, not the task pump. The worker is the
//! only thread touching the spinner and countdown, and the toolkit locks
//! internally, so the splash may manipulate widgets directly. The countdown
//! label is created once per worker and reused; the spinner is created and
//! deleted per cycle.

use core::fmt::Write;
use std::thread;
use std::time::Duration;

use heapless::String;

use super::{Screen, create_screen, create_widget, rect};
use crate::colors::BLACK;
use crate::config::CENTER_X;
use crate::styles::{BUTTON, CHECKBOX, COUNTDOWN, Font, SCREEN_LIGHT, SPINNER, WidgetStyle};
use crate::toolkit::{Toolkit, WidgetHandle, WidgetKind, WidgetDef};

// =============================================================================
// Layout Constants
// =============================================================================

const TITLE: &str = "THERMO PANEL";

const SIMULATE_CAPTION: &str = "Simulate temperature";

const START_CAPTION: &str = "Start";

/// Start button size (centered on screen).
const START_WIDTH: u32 = 100;
const START_HEIGHT: u32 = 50;

/// Spinner diameter (centered on screen).
const SPINNER_SIZE: u32 = 100;

/// One full spinner revolution.
const SPINNER_SPIN_MS: u32 = 750;

/// Spinner arc length in degrees.
const SPINNER_ARC_DEG: u32 = 90;

const TITLE_STYLE: WidgetStyle = WidgetStyle::text(BLACK, Font::Headline);

/// Entry screen widget handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntryWidgets {
    pub root: Option<WidgetHandle>,
    pub start: Option<WidgetHandle>,
    pub simulate: Option<WidgetHandle>,
}

impl EntryWidgets {
    pub fn build(toolkit: &dyn Toolkit) -> Self {
        let root = create_screen(toolkit, Screen::Entry, SCREEN_LIGHT);

        let title = WidgetKind::Label { text: TITLE.into() };
        create_widget(toolkit, root, "entry title", WidgetDef::new(title, rect(10, 10, 300, 30), TITLE_STYLE));

        let start = create_widget(
            toolkit,
            root,
            "start button",
            WidgetDef::new(
                WidgetKind::Button {
                    caption: START_CAPTION.into(),
                },
                rect(CENTER_X - START_WIDTH as i32 / 2, 95, START_WIDTH, START_HEIGHT),
                BUTTON,
            ),
        );

        let simulate = create_widget(
            toolkit,
            root,
            "simulate checkbox",
            WidgetDef::new(
                WidgetKind::Checkbox {
                    caption: SIMULATE_CAPTION.into(),
                },
                rect(50, 50, 240, 30),
                CHECKBOX,
            ),
        );

        Self { root, start, simulate }
    }
}

// =============================================================================
// Preload Splash
// =============================================================================

/// Spinner and countdown shown on the Entry screen while preloading.
pub struct Splash {
    entry: EntryWidgets,
    countdown: Option<WidgetHandle>,
}

impl Splash {
    /// Create the (hidden) countdown label. Call once per worker.
    pub fn new(
        toolkit: &dyn Toolkit,
        entry: EntryWidgets,
    ) -> Self {
        let label = WidgetKind::Label { text: Default::default() };
        let countdown = create_widget(
            toolkit,
            entry.root,
            "countdown label",
            WidgetDef::new(label, rect(CENTER_X, 190, 40, 40), COUNTDOWN),
        );
        if let Some(handle) = countdown {
            toolkit.set_hidden(handle, true);
        }
        Self { entry, countdown }
    }

    /// One blocking splash cycle: `steps` countdown steps of `step` each.
    pub fn run(
        &self,
        toolkit: &dyn Toolkit,
        steps: u32,
        step: Duration,
    ) {
        let spinner = create_widget(
            toolkit,
            self.entry.root,
            "preload spinner",
            WidgetDef::new(
                WidgetKind::Spinner {
                    spin_ms: SPINNER_SPIN_MS,
                    arc_deg: SPINNER_ARC_DEG,
                },
                rect(CENTER_X - SPINNER_SIZE as i32 / 2, 70, SPINNER_SIZE, SPINNER_SIZE),
                SPINNER,
            ),
        );

        self.set_controls_hidden(toolkit, true);
        if let Some(label) = self.countdown {
            toolkit.set_hidden(label, false);
        }

        let mut text: String<12> = String::new();
        for remaining in (1..=steps).rev() {
            if let Some(label) = self.countdown {
                text.clear();
                let _ = write!(text, "{remaining}");
                toolkit.set_text(label, &text);
            }
            tracing::debug!(remaining, "preload countdown");
            thread::sleep(step);
        }

        self.set_controls_hidden(toolkit, false);
        if let Some(label) = self.countdown {
            toolkit.set_hidden(label, true);
        }
        if let Some(spinner) = spinner {
            toolkit.delete(spinner);
        }
    }

    fn set_controls_hidden(
        &self,
        toolkit: &dyn Toolkit,
        hidden: bool,
    ) {
        for handle in [self.entry.start, self.entry.simulate].into_iter().flatten() {
            toolkit.set_hidden(handle, hidden);
        }
    }

    /// Countdown label handle.
    pub const fn countdown(&self) -> Option<WidgetHandle> {
        self.countdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::FramebufferToolkit;

    #[test]
    fn test_build_entry() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let entry = EntryWidgets::build(&toolkit);
        assert_eq!(toolkit.text(entry.start.unwrap()).as_deref(), Some("Start"));
        assert!(!toolkit.is_checked(entry.simulate.unwrap()));
    }

    #[test]
    fn test_splash_restores_controls_and_removes_spinner() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let entry = EntryWidgets::build(&toolkit);
        let splash = Splash::new(&toolkit, entry);
        let label = splash.countdown().unwrap();
        assert!(toolkit.is_hidden(label));
        let before = toolkit.object_count();

        splash.run(&toolkit, 3, Duration::from_millis(1));

        assert_eq!(toolkit.object_count(), before);
        assert!(toolkit.is_hidden(label));
        assert_eq!(toolkit.text(label).as_deref(), Some("1"));
        assert!(!toolkit.is_hidden(entry.start.unwrap()));
        assert!(!toolkit.is_hidden(entry.simulate.unwrap()));
    }

    #[test]
    fn test_splash_hides_controls_while_running() {
        let toolkit = std::sync::Arc::new(FramebufferToolkit::new(320, 240));
        let entry = EntryWidgets::build(toolkit.as_ref());
        let splash = Splash::new(toolkit.as_ref(), entry);

        let worker = {
            let toolkit = toolkit.clone();
            thread::spawn(move || splash.run(toolkit.as_ref(), 1, Duration::from_millis(200)))
        };
        thread::sleep(Duration::from_millis(50));
        assert!(toolkit.is_hidden(entry.start.unwrap()));
        assert!(toolkit.is_hidden(entry.simulate.unwrap()));
        worker.join().unwrap();
        assert!(!toolkit.is_hidden(entry.start.unwrap()));
    }
}
