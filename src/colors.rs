//! Color constants for the panel.
//!
//! Standard colors come from the `RgbColor` trait constants; the few custom
//! shades are spelled out in raw Rgb565 channels (5/6/5 bits).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Dark screen backgrounds.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Light screen backgrounds and text on dark ones.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Countdown text and the gauge critical zone.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure blue. Current temperature needle and chart series.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow. Main screen headline.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Orange. Warning needle, slider indicator, chart series and lit LED.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Mid gray. Slider track, chart grid, unchecked box border.
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Light gray. Spinner track and disabled surfaces.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(23, 47, 23);

/// Dark red. Unlit alert LED.
pub const DARK_RED: Rgb565 = Rgb565::new(10, 4, 0);

/// Blueish accent. Buttons and the spinner arc.
pub const ACCENT: Rgb565 = Rgb565::new(4, 21, 17);
