//! Main screen: gauge, warning slider and alert LED.
//!
//! # Visual Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ [<]        TEMPERATURE         [>] │
//! │              .-'''-.               │
//! │            /  ╲      \             │  Needle 0: current (blue)
//! │           |    ●──    |            │  Needle 1: warning (orange)
//! │            \   20    /             │  Red ticks from CRITICAL_TEMP
//! │                                    │
//! │   ════════════●─────────      (●)  │  Warning slider, alert LED
//! └────────────────────────────────────┘
//! ```

use super::{Screen, create_screen, create_widget, rect};
use crate::config::{CRITICAL_TEMP, DEFAULT_WARNING_TEMP, DEG_PER_INTERVAL, MAX_TEMP};
use crate::styles::{BUTTON, GAUGE, HEADLINE_YELLOW, LED, SCREEN_DARK, SLIDER, WARNING_NEEDLE};
use crate::toolkit::{GaugeScale, Toolkit, WidgetHandle, WidgetKind, WidgetDef};

/// Gauge needle showing the current temperature.
pub const NEEDLE_CURRENT: usize = 0;

/// Gauge needle showing the warning threshold.
pub const NEEDLE_WARNING: usize = 1;

const GAUGE_SCALE: GaugeScale = GaugeScale {
    min: 0,
    max: MAX_TEMP,
    critical: CRITICAL_TEMP,
    interval: DEG_PER_INTERVAL,
    needles: [GAUGE.accent, WARNING_NEEDLE],
};

/// Main screen widget handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct MainWidgets {
    pub root: Option<WidgetHandle>,
    pub prev: Option<WidgetHandle>,
    pub next: Option<WidgetHandle>,
    pub gauge: Option<WidgetHandle>,
    pub slider: Option<WidgetHandle>,
    pub led: Option<WidgetHandle>,
}

impl MainWidgets {
    pub fn build(toolkit: &dyn Toolkit) -> Self {
        let root = create_screen(toolkit, Screen::Main, SCREEN_DARK);

        let headline = WidgetKind::Label {
            text: "TEMPERATURE".into(),
        };
        create_widget(toolkit, root, "main headline", WidgetDef::new(headline, rect(60, 5, 200, 30), HEADLINE_YELLOW));

        let prev = create_widget(toolkit, root, "main prev", nav_button("<", rect(10, 10, 40, 25)));
        let next = create_widget(toolkit, root, "main next", nav_button(">", rect(270, 10, 40, 25)));

        let gauge = create_widget(
            toolkit,
            root,
            "temperature gauge",
            WidgetDef::new(WidgetKind::Gauge(GAUGE_SCALE), rect(85, 38, 150, 150), GAUGE),
        );

        let slider = create_widget(
            toolkit,
            root,
            "warning slider",
            WidgetDef::new(WidgetKind::Slider { min: 0, max: MAX_TEMP }, rect(60, 206, 200, 18), SLIDER),
        );
        if let Some(slider) = slider {
            toolkit.set_value(slider, DEFAULT_WARNING_TEMP);
        }

        let led = create_widget(toolkit, root, "alert led", WidgetDef::new(WidgetKind::Led, rect(278, 202, 26, 26), LED));

        Self {
            root,
            prev,
            next,
            gauge,
            slider,
            led,
        }
    }
}

/// Small Prev/Next button used on every screen but Entry.
pub(crate) fn nav_button(
    caption: &str,
    bounds: embedded_graphics::primitives::Rectangle,
) -> WidgetDef {
    WidgetDef::new(
        WidgetKind::Button {
            caption: caption.into(),
        },
        bounds,
        BUTTON,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::FramebufferToolkit;

    #[test]
    fn test_slider_starts_at_default_warning() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let main = MainWidgets::build(&toolkit);
        assert_eq!(toolkit.value(main.slider.unwrap()), Some(DEFAULT_WARNING_TEMP));
        assert!(!toolkit.is_led_on(main.led.unwrap()));
        assert_eq!(toolkit.needle(main.gauge.unwrap(), NEEDLE_WARNING), Some(0));
    }
}
