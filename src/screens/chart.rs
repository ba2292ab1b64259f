//! Chart screen: the last `CHART_POINTS` readings as two line series.
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ [<]   Current     Warning      [>] │  Legend in series colors
//! │ ┌────────────────────────────────┐ │
//! │ │────────────────────────────────│ │
//! │ │   ___/‾‾‾\___                  │ │  Newest sample on the right,
//! │ │────────────────────────────────│ │  oldest shifts out on the left
//! │ └────────────────────────────────┘ │
//! └────────────────────────────────────┘
//! ```

use super::main_screen::nav_button;
use super::{Screen, create_screen, create_widget, rect};
use crate::colors::{BLUE, ORANGE};
use crate::config::{CHART_POINTS, DEG_PER_INTERVAL, MAX_TEMP};
use crate::styles::{CHART, Font, SCREEN_LIGHT, WidgetStyle};
use crate::toolkit::{Toolkit, WidgetHandle, WidgetKind, WidgetDef};

/// Chart series of the current temperature.
pub const SERIES_CURRENT: usize = 0;

/// Chart series of the warning threshold.
pub const SERIES_WARNING: usize = 1;

/// Chart screen widget handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartWidgets {
    pub root: Option<WidgetHandle>,
    pub prev: Option<WidgetHandle>,
    pub next: Option<WidgetHandle>,
    pub chart: Option<WidgetHandle>,
}

impl ChartWidgets {
    pub fn build(toolkit: &dyn Toolkit) -> Self {
        let root = create_screen(toolkit, Screen::Chart, SCREEN_LIGHT);

        for (text, color, x) in [("Current", BLUE, 60), ("Warning", ORANGE, 160)] {
            let legend = WidgetKind::Label { text: text.into() };
            let style = WidgetStyle::text(color, Font::Body);
            create_widget(toolkit, root, "chart legend", WidgetDef::new(legend, rect(x, 10, 100, 25), style));
        }

        let prev = create_widget(toolkit, root, "chart prev", nav_button("<", rect(10, 10, 40, 25)));
        let next = create_widget(toolkit, root, "chart next", nav_button(">", rect(270, 10, 40, 25)));

        let chart = create_widget(
            toolkit,
            root,
            "temperature chart",
            WidgetDef::new(
                WidgetKind::Chart {
                    min: 0,
                    max: MAX_TEMP,
                    points: CHART_POINTS,
                    divisions: MAX_TEMP / DEG_PER_INTERVAL - 1,
                    series: vec![BLUE, ORANGE],
                },
                rect(10, 45, 300, 185),
                CHART,
            ),
        );

        Self { root, prev, next, chart }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::FramebufferToolkit;

    #[test]
    fn test_chart_starts_empty() {
        let toolkit = FramebufferToolkit::new(320, 240);
        let chart = ChartWidgets::build(&toolkit);
        let handle = chart.chart.unwrap();
        assert!(toolkit.series(handle, SERIES_CURRENT).is_empty());
        assert!(toolkit.series(handle, SERIES_WARNING).is_empty());
    }
}
