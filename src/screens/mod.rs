//! Screens of the panel and the navigation table between them.
//!
//! # Screens
//!
//! 1. **Entry** ([`entry`]): title, Start button, simulate checkbox, preload splash
//! 2. **Main** ([`main_screen`]): two-needle gauge, warning slider, alert LED
//! 3. **Chart** ([`chart`]): history of current and warning temperature
//! 4. **Image** ([`image`]): animated logo
//!
//! # Navigation
//!
//! ```text
//!            Start (preload)        Next          Next
//!   Entry ───────────────────▶ Main ─────▶ Chart ─────▶ Image
//!     ▲                         │  ◀─────        ◀─────
//!     └─────────── Prev ────────┘   Prev          Prev
//! ```
//!
//! [`action_for`] is the pure transition table: it maps "control C on screen S
//! fired event E" to an [`Action`]. The controller executes actions; nothing
//! here touches the toolkit except the widget builders.
//!
//! # Degraded Mode
//!
//! Builders keep `None` for every widget the toolkit refused to create and log
//! it once. Widgets on a missing screen are never requested.

pub mod chart;
pub mod entry;
pub mod image;
pub mod main_screen;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub use chart::ChartWidgets;
pub use entry::{EntryWidgets, Splash};
pub use image::ImageWidgets;
pub use main_screen::MainWidgets;

use crate::styles::WidgetStyle;
use crate::toolkit::{EventKind, Toolkit, WidgetHandle, WidgetDef};

// =============================================================================
// Navigation State
// =============================================================================

/// The screen currently shown. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Entry,
    Main,
    Chart,
    Image,
}

impl Screen {
    /// Short name for log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Main => "main",
            Self::Chart => "chart",
            Self::Image => "image",
        }
    }
}

/// Interactive controls bound to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Start,
    Simulate,
    Prev,
    Next,
    WarningSlider,
}

/// What the controller does in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Reset temperatures, re-render Entry and trigger the preload splash.
    StartPreload,
    /// Copy the checkbox state into the simulate flag.
    ToggleSimulate,
    /// Uncheck simulate, switch simulation off, restore defaults, open Entry.
    ReturnToEntry,
    /// Copy the slider value into the warning temperature.
    SetWarning,
    /// Open a screen synchronously.
    Open(Screen),
}

/// Transition table. `None` for events that do nothing.
pub const fn action_for(
    screen: Screen,
    control: Control,
    kind: EventKind,
) -> Option<Action> {
    use Control::{Next, Prev, Simulate, Start, WarningSlider};
    use EventKind::{Clicked, ValueChanged};

    match (screen, control, kind) {
        (Screen::Entry, Start, Clicked) => Some(Action::StartPreload),
        (Screen::Entry, Simulate, ValueChanged) => Some(Action::ToggleSimulate),
        (Screen::Main, Prev, Clicked) => Some(Action::ReturnToEntry),
        (Screen::Main, Next, Clicked) => Some(Action::Open(Screen::Chart)),
        (Screen::Main, WarningSlider, ValueChanged) => Some(Action::SetWarning),
        (Screen::Chart, Prev, Clicked) => Some(Action::Open(Screen::Main)),
        (Screen::Chart, Next, Clicked) => Some(Action::Open(Screen::Image)),
        (Screen::Image, Prev, Clicked) => Some(Action::Open(Screen::Chart)),
        _ => None,
    }
}

// =============================================================================
// Widget Construction
// =============================================================================

/// Rectangle from position and size.
#[inline]
pub(crate) const fn rect(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}

/// Create a screen root, logging a refusal.
pub(crate) fn create_screen(
    toolkit: &dyn Toolkit,
    screen: Screen,
    style: WidgetStyle,
) -> Option<WidgetHandle> {
    let handle = toolkit.create_screen(style);
    if handle.is_none() {
        tracing::warn!(screen = screen.name(), "toolkit refused screen, screen disabled");
    }
    handle
}

/// Create a widget on `parent`, logging a refusal. A missing parent yields
/// `None` without asking the toolkit.
pub(crate) fn create_widget(
    toolkit: &dyn Toolkit,
    parent: Option<WidgetHandle>,
    widget: &'static str,
    def: WidgetDef,
) -> Option<WidgetHandle> {
    let handle = toolkit.create_widget(parent?, def);
    if handle.is_none() {
        tracing::warn!(widget, "toolkit refused widget, feature disabled");
    }
    handle
}

/// Every screen's widgets, built once at start-up.
#[derive(Debug, Default)]
pub struct ScreenSet {
    pub entry: EntryWidgets,
    pub main: MainWidgets,
    pub chart: ChartWidgets,
    pub image: ImageWidgets,
}

impl ScreenSet {
    /// Build all four screens.
    pub fn build(toolkit: &dyn Toolkit) -> Self {
        let set = Self {
            entry: EntryWidgets::build(toolkit),
            main: MainWidgets::build(toolkit),
            chart: ChartWidgets::build(toolkit),
            image: ImageWidgets::build(toolkit),
        };
        tracing::info!(bindings = set.bindings().len(), "screens built");
        set
    }

    /// Root handle of `screen`.
    pub const fn root(
        &self,
        screen: Screen,
    ) -> Option<WidgetHandle> {
        match screen {
            Screen::Entry => self.entry.root,
            Screen::Main => self.main.root,
            Screen::Chart => self.chart.root,
            Screen::Image => self.image.root,
        }
    }

    /// Interactive widgets with the screen and control they belong to.
    pub fn bindings(&self) -> Vec<(WidgetHandle, Screen, Control)> {
        let candidates = [
            (self.entry.start, Screen::Entry, Control::Start),
            (self.entry.simulate, Screen::Entry, Control::Simulate),
            (self.main.prev, Screen::Main, Control::Prev),
            (self.main.next, Screen::Main, Control::Next),
            (self.main.slider, Screen::Main, Control::WarningSlider),
            (self.chart.prev, Screen::Chart, Control::Prev),
            (self.chart.next, Screen::Chart, Control::Next),
            (self.image.prev, Screen::Image, Control::Prev),
        ];
        candidates
            .into_iter()
            .filter_map(|(handle, screen, control)| handle.map(|h| (h, screen, control)))
            .collect()
    }

    /// Delete every screen and the widgets on it.
    pub fn destroy(
        &self,
        toolkit: &dyn Toolkit,
    ) {
        for screen in [Screen::Entry, Screen::Main, Screen::Chart, Screen::Image] {
            if let Some(root) = self.root(screen) {
                toolkit.delete(root);
            }
        }
        tracing::debug!("screens destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::FramebufferToolkit;

    #[test]
    fn test_transition_table() {
        use Control::*;
        use EventKind::*;

        assert_eq!(action_for(Screen::Entry, Start, Clicked), Some(Action::StartPreload));
        assert_eq!(action_for(Screen::Entry, Simulate, ValueChanged), Some(Action::ToggleSimulate));
        assert_eq!(action_for(Screen::Main, Prev, Clicked), Some(Action::ReturnToEntry));
        assert_eq!(action_for(Screen::Main, Next, Clicked), Some(Action::Open(Screen::Chart)));
        assert_eq!(action_for(Screen::Main, WarningSlider, ValueChanged), Some(Action::SetWarning));
        assert_eq!(action_for(Screen::Chart, Prev, Clicked), Some(Action::Open(Screen::Main)));
        assert_eq!(action_for(Screen::Chart, Next, Clicked), Some(Action::Open(Screen::Image)));
        assert_eq!(action_for(Screen::Image, Prev, Clicked), Some(Action::Open(Screen::Chart)));
    }

    #[test]
    fn test_irrelevant_events_do_nothing() {
        use Control::*;
        use EventKind::*;

        // Checkbox also emits Clicked, only the value change counts
        assert_eq!(action_for(Screen::Entry, Simulate, Clicked), None);
        assert_eq!(action_for(Screen::Entry, Start, ValueChanged), None);
        assert_eq!(action_for(Screen::Main, WarningSlider, Clicked), None);
        assert_eq!(action_for(Screen::Image, Next, Clicked), None);
    }

    #[test]
    fn test_default_screen_is_entry() {
        assert_eq!(Screen::default(), Screen::Entry);
    }

    #[test]
    fn test_build_binds_all_controls() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let set = ScreenSet::build(&toolkit);
        assert_eq!(set.bindings().len(), 8);
        for screen in [Screen::Entry, Screen::Main, Screen::Chart, Screen::Image] {
            assert!(set.root(screen).is_some());
        }
    }

    #[test]
    fn test_build_degrades_without_resources() {
        let toolkit = FramebufferToolkit::with_capacity(320, 240, 3);
        let set = ScreenSet::build(&toolkit);
        assert!(set.entry.root.is_some());
        assert!(set.main.root.is_none());
        assert!(set.main.gauge.is_none());
        assert!(set.bindings().len() <= 2);
    }

    #[test]
    fn test_destroy_removes_everything() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let set = ScreenSet::build(&toolkit);
        assert!(toolkit.object_count() > 0);
        set.destroy(&toolkit);
        assert_eq!(toolkit.object_count(), 0);
    }
}
