//! Widget drawing with `embedded-graphics` primitives.
//!
//! One function per widget kind. All of them are generic over the draw target
//! so they work on the in-memory [`FrameBuffer`](super::FrameBuffer) as well as
//! any display driver. Drawing errors are ignored (`.ok()`): a failed pixel
//! write on a framebuffer has no recovery path.
//!
//! # Gauge Geometry
//!
//! The gauge scale spans 270 degrees, starting at the bottom-left (135 degrees
//! in screen coordinates, y pointing down) and running clockwise to the
//! bottom-right. [`needle_angle`] maps a value to that range.

use core::fmt::Write;

use embedded_graphics::geometry::AngleUnit;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, CornerRadii, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;
use heapless::String;

use super::GaugeScale;
use crate::styles::{CENTERED, CRITICAL_ZONE, LARGE_FONT, LEFT_ALIGNED, SCALE_STYLE, WidgetStyle};

// =============================================================================
// Layout Constants
// =============================================================================

/// Checkbox square edge.
const CHECKBOX_BOX: u32 = 18;

/// Gap between checkbox square and caption.
const CHECKBOX_GAP: i32 = 8;

/// Slider knob diameter.
const KNOB_DIAMETER: u32 = 16;

/// Gauge scale start angle in degrees (screen coordinates).
const GAUGE_START_DEG: f32 = 135.0;

/// Gauge scale sweep in degrees.
const GAUGE_SWEEP_DEG: f32 = 270.0;

/// Spinner ring thickness.
const SPINNER_WIDTH: u32 = 8;

// =============================================================================
// Simple Widgets
// =============================================================================

/// Fill a screen root with its background color.
pub fn draw_screen<D>(
    display: &mut D,
    bounds: Rectangle,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    bounds.into_styled(PrimitiveStyle::with_fill(style.bg)).draw(display).ok();
}

/// Draw label text centered in its bounds.
pub fn draw_label<D>(
    display: &mut D,
    bounds: Rectangle,
    text: &str,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(text, bounds.center(), style.text_style(), CENTERED)
        .draw(display)
        .ok();
}

/// Draw a rounded push button with a centered caption.
pub fn draw_button<D>(
    display: &mut D,
    bounds: Rectangle,
    caption: &str,
    pressed: bool,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let fill = if pressed { style.accent } else { style.bg };
    RoundedRectangle::new(bounds, CornerRadii::new(Size::new(6, 6)))
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)
        .ok();
    Text::with_text_style(caption, bounds.center(), style.text_style(), CENTERED)
        .draw(display)
        .ok();
}

/// Draw a checkbox square with the caption to its right.
pub fn draw_checkbox<D>(
    display: &mut D,
    bounds: Rectangle,
    caption: &str,
    checked: bool,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let center_y = bounds.center().y;
    let box_top_left = Point::new(bounds.top_left.x, center_y - CHECKBOX_BOX as i32 / 2);
    let square = Rectangle::new(box_top_left, Size::new(CHECKBOX_BOX, CHECKBOX_BOX));

    let box_style = PrimitiveStyleBuilder::new()
        .stroke_color(style.fg)
        .stroke_width(2)
        .fill_color(style.bg)
        .build();
    square.into_styled(box_style).draw(display).ok();

    if checked {
        square
            .offset(-4)
            .into_styled(PrimitiveStyle::with_fill(style.accent))
            .draw(display)
            .ok();
    }

    let caption_pos = Point::new(bounds.top_left.x + CHECKBOX_BOX as i32 + CHECKBOX_GAP, center_y);
    Text::with_text_style(caption, caption_pos, style.text_style(), LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Draw a round LED, lit in `accent`, dark in `bg`.
pub fn draw_led<D>(
    display: &mut D,
    bounds: Rectangle,
    on: bool,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = bounds.size.width.min(bounds.size.height);
    let led_style = PrimitiveStyleBuilder::new()
        .stroke_color(style.fg)
        .stroke_width(2)
        .fill_color(if on { style.accent } else { style.bg })
        .build();
    Circle::with_center(bounds.center(), diameter)
        .into_styled(led_style)
        .draw(display)
        .ok();
}

/// Draw the logo image with its top-left corner at `top_left`.
pub fn draw_image<D>(
    display: &mut D,
    top_left: Point,
    size: Size,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let frame = Rectangle::new(top_left, size);
    RoundedRectangle::new(frame, CornerRadii::new(Size::new(8, 8)))
        .into_styled(PrimitiveStyle::with_fill(style.accent))
        .draw(display)
        .ok();
    Circle::with_center(frame.center(), size.width.min(size.height) / 2)
        .into_styled(PrimitiveStyle::with_fill(style.bg))
        .draw(display)
        .ok();
}

// =============================================================================
// Value Widgets
// =============================================================================

/// Horizontal pixel offset of `value` on a slider track `width` pixels wide.
pub fn slider_offset(
    value: i32,
    min: i32,
    max: i32,
    width: u32,
) -> i32 {
    let range = (max - min).max(1);
    let span = width.saturating_sub(1) as i32;
    ((value.clamp(min, max) - min) * span + range / 2) / range
}

/// Slider value under a horizontal pixel offset. Inverse of [`slider_offset`].
pub fn slider_value_at(
    offset: i32,
    min: i32,
    max: i32,
    width: u32,
) -> i32 {
    let span = (width.saturating_sub(1) as i32).max(1);
    let offset = offset.clamp(0, span);
    min + (offset * (max - min) + span / 2) / span
}

/// Draw a slider: rounded track, filled indicator up to the value, knob.
pub fn draw_slider<D>(
    display: &mut D,
    bounds: Rectangle,
    min: i32,
    max: i32,
    value: i32,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let radius = Size::new(bounds.size.height / 2, bounds.size.height / 2);
    RoundedRectangle::new(bounds, CornerRadii::new(radius))
        .into_styled(PrimitiveStyle::with_fill(style.bg))
        .draw(display)
        .ok();

    let offset = slider_offset(value, min, max, bounds.size.width);
    let indicator = Rectangle::new(bounds.top_left, Size::new(offset as u32 + 1, bounds.size.height));
    RoundedRectangle::new(indicator, CornerRadii::new(radius))
        .into_styled(PrimitiveStyle::with_fill(style.accent))
        .draw(display)
        .ok();

    let knob = Point::new(bounds.top_left.x + offset, bounds.center().y);
    Circle::with_center(knob, KNOB_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(style.fg))
        .draw(display)
        .ok();
}

/// Screen angle in degrees of `value` on a gauge scale.
pub fn needle_angle(
    value: i32,
    min: i32,
    max: i32,
) -> f32 {
    let range = (max - min).max(1) as f32;
    let fraction = (value.clamp(min, max) - min) as f32 / range;
    fraction.mul_add(GAUGE_SWEEP_DEG, GAUGE_START_DEG)
}

fn polar(
    center: Point,
    radius: f32,
    angle_deg: f32,
) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(
        center.x + radius.mul_add(rad.cos(), 0.5) as i32,
        center.y + radius.mul_add(rad.sin(), 0.5) as i32,
    )
}

/// Draw a round gauge with scale ticks, labels, needles and a readout of
/// needle 0.
pub fn draw_gauge<D>(
    display: &mut D,
    bounds: Rectangle,
    scale: &GaugeScale,
    values: &[i32; 2],
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let center = bounds.center();
    let diameter = bounds.size.width.min(bounds.size.height);
    let radius = diameter as f32 / 2.0;

    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_stroke(style.fg, 2))
        .draw(display)
        .ok();

    // One tick per degree, long ticks with a number every interval
    for value in scale.min..=scale.max {
        let angle = needle_angle(value, scale.min, scale.max);
        let major = scale.interval > 0 && (value - scale.min) % scale.interval == 0;
        let inner = if major { radius - 14.0 } else { radius - 8.0 };
        let color = if value >= scale.critical { CRITICAL_ZONE } else { style.fg };
        Line::new(polar(center, inner, angle), polar(center, radius - 3.0, angle))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)
            .ok();

        if major {
            let mut number: String<8> = String::new();
            let _ = write!(number, "{value}");
            Text::with_text_style(&number, polar(center, radius - 24.0, angle), SCALE_STYLE, CENTERED)
                .draw(display)
                .ok();
        }
    }

    // Draw the second needle first so needle 0 stays on top
    for (idx, value) in values.iter().enumerate().rev() {
        let angle = needle_angle(*value, scale.min, scale.max);
        Line::new(center, polar(center, radius - 16.0, angle))
            .into_styled(PrimitiveStyle::with_stroke(scale.needles[idx], 3))
            .draw(display)
            .ok();
    }
    Circle::with_center(center, 10)
        .into_styled(PrimitiveStyle::with_fill(style.fg))
        .draw(display)
        .ok();

    let mut readout: String<8> = String::new();
    let _ = write!(readout, "{}", values[0]);
    let readout_style = MonoTextStyle::new(LARGE_FONT, scale.needles[0]);
    let readout_pos = Point::new(center.x, center.y + (radius * 0.55) as i32);
    Text::with_text_style(&readout, readout_pos, readout_style, CENTERED)
        .draw(display)
        .ok();
}

/// Draw a line chart. Each series is drawn right-aligned: the newest sample
/// sits on the right edge, older samples shift left.
pub fn draw_chart<'a, D, S>(
    display: &mut D,
    bounds: Rectangle,
    min: i32,
    max: i32,
    points: usize,
    divisions: i32,
    series: S,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
    S: IntoIterator<Item = (Rgb565, &'a [i32])>,
{
    let frame_style = PrimitiveStyleBuilder::new()
        .stroke_color(style.fg)
        .stroke_width(1)
        .fill_color(style.bg)
        .build();
    bounds.into_styled(frame_style).draw(display).ok();

    let left = bounds.top_left.x;
    let top = bounds.top_left.y;
    let width = bounds.size.width as i32 - 1;
    let height = bounds.size.height as i32 - 1;
    let range = (max - min).max(1);

    // Horizontal division lines
    let rows = divisions.max(0) + 1;
    for row in 1..rows {
        let y = top + height * row / rows;
        Line::new(Point::new(left + 1, y), Point::new(left + width - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(style.accent, 1))
            .draw(display)
            .ok();
    }

    let step = if points > 1 { width / (points as i32 - 1) } else { width };
    let to_point = |slot: usize, value: i32| {
        let y = top + height - (value.clamp(min, max) - min) * height / range;
        Point::new(left + slot as i32 * step, y)
    };

    for (color, samples) in series {
        let visible = &samples[samples.len().saturating_sub(points)..];
        let first_slot = points - visible.len();
        let line_style = PrimitiveStyle::with_stroke(color, 3);
        for (i, pair) in visible.windows(2).enumerate() {
            Line::new(to_point(first_slot + i, pair[0]), to_point(first_slot + i + 1, pair[1]))
                .into_styled(line_style)
                .draw(display)
                .ok();
        }
        if let [only] = visible {
            Circle::with_center(to_point(first_slot, *only), 4)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(display)
                .ok();
        }
    }
}

/// Draw the busy spinner: a light ring with an arc rotating once per
/// `spin_ms` of toolkit time.
pub fn draw_spinner<D>(
    display: &mut D,
    bounds: Rectangle,
    tick_ms: u64,
    spin_ms: u32,
    arc_deg: u32,
    style: &WidgetStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = bounds.size.width.min(bounds.size.height).saturating_sub(SPINNER_WIDTH);
    Circle::with_center(bounds.center(), diameter)
        .into_styled(PrimitiveStyle::with_stroke(style.fg, SPINNER_WIDTH))
        .draw(display)
        .ok();

    let spin = u64::from(spin_ms.max(1));
    let start = (tick_ms % spin) as f32 * 360.0 / spin as f32;
    Arc::with_center(bounds.center(), diameter, start.deg(), (arc_deg as f32).deg())
        .into_styled(PrimitiveStyle::with_stroke(style.accent, SPINNER_WIDTH))
        .draw(display)
        .ok();
}
