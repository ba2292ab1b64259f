//! Text styles and per-widget style objects.
//!
//! Text alignment and the common fonts are `const` so drawing code never
//! rebuilds them. Widget colors are carried by [`WidgetStyle`], a small `Copy`
//! value the screen builders create when they construct their widgets and hand
//! to the toolkit together with the widget. Nothing is shared through mutable
//! statics.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_14_POINT, PROFONT_24_POINT};

use crate::colors::{ACCENT, BLACK, BLUE, DARK_RED, GRAY, LIGHT_GRAY, ORANGE, RED, WHITE, YELLOW};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Button captions, headlines, countdown.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned text. Checkbox captions and legends.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Small font for scale labels and captions.
pub const SMALL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Body font for buttons and checkboxes.
pub const BODY_FONT: &MonoFont<'static> = &FONT_10X20;

/// Headline font.
pub const HEADLINE_FONT: &MonoFont<'static> = &PROFONT_14_POINT;

/// Large font for the countdown and the gauge readout.
pub const LARGE_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

/// Small white text used for gauge scale numbers.
pub const SCALE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Font choice carried by a [`WidgetStyle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Small,
    Body,
    Headline,
    Large,
}

impl Font {
    /// The monospace font behind this choice.
    pub const fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => SMALL_FONT,
            Self::Body => BODY_FONT,
            Self::Headline => HEADLINE_FONT,
            Self::Large => LARGE_FONT,
        }
    }
}

// =============================================================================
// Widget Styles
// =============================================================================

/// Colors and font for one widget.
///
/// `fg` is text/stroke, `bg` the body fill and `accent` the widget specific
/// highlight (needle, indicator, lit LED, spinner arc).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetStyle {
    pub fg: Rgb565,
    pub bg: Rgb565,
    pub accent: Rgb565,
    pub font: Font,
}

impl WidgetStyle {
    /// Style with the given text color on a transparent body.
    pub const fn text(
        fg: Rgb565,
        font: Font,
    ) -> Self {
        Self {
            fg,
            bg: BLACK,
            accent: fg,
            font,
        }
    }

    /// Text style built from this widget style.
    #[inline]
    pub fn text_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font.mono(), self.fg)
    }
}

/// Screen background for the light screens.
pub const SCREEN_LIGHT: WidgetStyle = WidgetStyle {
    fg: BLACK,
    bg: WHITE,
    accent: ACCENT,
    font: Font::Body,
};

/// Screen background for the dark main screen.
pub const SCREEN_DARK: WidgetStyle = WidgetStyle {
    fg: WHITE,
    bg: BLACK,
    accent: ORANGE,
    font: Font::Body,
};

/// Push button.
pub const BUTTON: WidgetStyle = WidgetStyle {
    fg: WHITE,
    bg: ACCENT,
    accent: LIGHT_GRAY,
    font: Font::Body,
};

/// Checkbox on a light screen.
pub const CHECKBOX: WidgetStyle = WidgetStyle {
    fg: BLACK,
    bg: WHITE,
    accent: ACCENT,
    font: Font::Body,
};

/// Gauge: current needle uses `accent`, warning needle is [`WARNING_NEEDLE`].
pub const GAUGE: WidgetStyle = WidgetStyle {
    fg: WHITE,
    bg: BLACK,
    accent: BLUE,
    font: Font::Small,
};

/// Color of the second gauge needle.
pub const WARNING_NEEDLE: Rgb565 = ORANGE;

/// Color of the gauge critical zone.
pub const CRITICAL_ZONE: Rgb565 = RED;

/// Warning slider: gray track, orange indicator, white knob.
pub const SLIDER: WidgetStyle = WidgetStyle {
    fg: WHITE,
    bg: GRAY,
    accent: ORANGE,
    font: Font::Small,
};

/// Alert LED: `accent` when lit, `bg` when off.
pub const LED: WidgetStyle = WidgetStyle {
    fg: BLACK,
    bg: DARK_RED,
    accent: ORANGE,
    font: Font::Small,
};

/// Chart frame and grid. Series colors are given per series.
pub const CHART: WidgetStyle = WidgetStyle {
    fg: BLACK,
    bg: WHITE,
    accent: GRAY,
    font: Font::Small,
};

/// Preload spinner: light track with blueish arc.
pub const SPINNER: WidgetStyle = WidgetStyle {
    fg: LIGHT_GRAY,
    bg: WHITE,
    accent: ACCENT,
    font: Font::Small,
};

/// Main screen headline.
pub const HEADLINE_YELLOW: WidgetStyle = WidgetStyle::text(YELLOW, Font::Headline);

/// Countdown label on the entry screen.
pub const COUNTDOWN: WidgetStyle = WidgetStyle::text(RED, Font::Large);
