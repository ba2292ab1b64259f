//! Image screen: a logo bouncing back and forth.
//!
//! The logo sweeps from `ANIM_X_MIN` to `ANIM_X_MAX` in `ANIM_SWEEP_MS`, then
//! plays back. Its height follows a tent shaped bump that peaks mid-screen.

use super::main_screen::nav_button;
use super::{Screen, create_screen, create_widget, rect};
use crate::config::{ANIM_SWEEP_MS, ANIM_X_MAX, ANIM_X_MIN, ANIM_Y_START};
use crate::styles::{SCREEN_LIGHT, WidgetStyle};
use crate::toolkit::{Animation, Toolkit, WidgetHandle, WidgetKind, WidgetDef};

/// Logo edge length.
const LOGO_SIZE: u32 = 30;

/// How far the logo rises at the middle of the sweep.
const BUMP_HEIGHT: i32 = 60;

/// Accent-colored tile with a white disc.
const LOGO_STYLE: WidgetStyle = SCREEN_LIGHT;

/// Vertical position of the logo for horizontal position `x`.
pub fn bounce_path(x: i32) -> i32 {
    let mid = (ANIM_X_MIN + ANIM_X_MAX) / 2;
    let half = (ANIM_X_MAX - ANIM_X_MIN) / 2;
    let distance = (x - mid).abs().min(half);
    ANIM_Y_START - (half - distance) * BUMP_HEIGHT / half
}

const BOUNCE: Animation = Animation {
    from: ANIM_X_MIN,
    to: ANIM_X_MAX,
    sweep_ms: ANIM_SWEEP_MS,
    path: bounce_path,
};

/// Image screen widget handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageWidgets {
    pub root: Option<WidgetHandle>,
    pub prev: Option<WidgetHandle>,
    pub logo: Option<WidgetHandle>,
}

impl ImageWidgets {
    pub fn build(toolkit: &dyn Toolkit) -> Self {
        let root = create_screen(toolkit, Screen::Image, SCREEN_LIGHT);
        let prev = create_widget(toolkit, root, "image prev", nav_button("<", rect(10, 10, 40, 25)));
        let logo = create_widget(
            toolkit,
            root,
            "logo image",
            WidgetDef::new(
                WidgetKind::Image { animation: Some(BOUNCE) },
                rect(ANIM_X_MIN, ANIM_Y_START, LOGO_SIZE, LOGO_SIZE),
                LOGO_STYLE,
            ),
        );
        Self { root, prev, logo }
    }
}
