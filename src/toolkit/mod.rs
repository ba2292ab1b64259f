//! The GUI toolkit boundary.
//!
//! The panel runtime only talks to the display through the [`Toolkit`] trait:
//! create screens and widgets, poke their values, advance the toolkit clock
//! and run its task handler. Implementations must be `Send + Sync`; the
//! runtime still confines widget mutation to the task pump thread (plus the
//! preload splash, see [`crate::preload`]).
//!
//! - [`framebuffer`]: retained-mode implementation drawing into a [`FrameBuffer`]
//! - [`display`]: the RGB565 framebuffer draw target
//! - [`draw`]: per-widget drawing with `embedded-graphics` primitives
//!
//! # Handles
//!
//! Every created object is identified by a [`WidgetHandle`]. Creation returns
//! `Option<WidgetHandle>`: `None` means the toolkit ran out of resources. Callers
//! keep the `None`, log it, and treat every later operation on it as a no-op.
//! Operations on unknown handles are ignored by implementations.

pub mod display;
pub mod draw;
pub mod framebuffer;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub use display::FrameBuffer;
pub use framebuffer::FramebufferToolkit;

use crate::styles::WidgetStyle;

/// Opaque identifier of a toolkit object (screen or widget).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(u32);

impl WidgetHandle {
    /// Wrap a raw id. Only toolkit implementations mint handles.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id, for log fields.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Kind of input event reported by the task handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Pointer pressed and released on the same widget.
    Clicked,
    /// Checkbox toggled or slider moved.
    ValueChanged,
}

/// One input event targeted at a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolkitEvent {
    pub target: WidgetHandle,
    pub kind: EventKind,
}

/// Looping horizontal animation with a custom vertical path.
///
/// The widget moves from `from` to `to` in `sweep_ms`, then plays back.
/// `path` maps the current x to the y coordinate.
#[derive(Clone, Copy, Debug)]
pub struct Animation {
    pub from: i32,
    pub to: i32,
    pub sweep_ms: u32,
    pub path: fn(i32) -> i32,
}

impl Animation {
    /// Position of the animated widget at toolkit time `tick_ms`.
    pub fn position(
        &self,
        tick_ms: u64,
    ) -> Point {
        let sweep = u64::from(self.sweep_ms.max(1));
        let phase = tick_ms % (sweep * 2);
        // Forward sweep, then playback
        let progress = if phase < sweep { phase } else { sweep * 2 - phase };
        let span = i64::from(self.to - self.from);
        let x = self.from + (span * progress as i64 / sweep as i64) as i32;
        Point::new(x, (self.path)(x))
    }
}

/// Gauge scale and needle configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeScale {
    pub min: i32,
    pub max: i32,
    /// Values at or above this are drawn in the critical color.
    pub critical: i32,
    /// Degrees between labelled ticks.
    pub interval: i32,
    /// Needle colors, index 0 first.
    pub needles: [Rgb565; 2],
}

/// What to create.
#[derive(Clone, Debug)]
pub enum WidgetKind {
    Label { text: String },
    Button { caption: String },
    Checkbox { caption: String },
    Slider { min: i32, max: i32 },
    Gauge(GaugeScale),
    Chart {
        min: i32,
        max: i32,
        points: usize,
        /// Horizontal grid divisions.
        divisions: i32,
        series: Vec<Rgb565>,
    },
    Led,
    Image { animation: Option<Animation> },
    /// Busy indicator: an arc of `arc_deg` turning once per `spin_ms`.
    Spinner { spin_ms: u32, arc_deg: u32 },
}

/// Creation request: kind, absolute bounds and style.
#[derive(Clone, Debug)]
pub struct WidgetDef {
    pub kind: WidgetKind,
    pub bounds: Rectangle,
    pub style: WidgetStyle,
}

impl WidgetDef {
    pub fn new(
        kind: WidgetKind,
        bounds: Rectangle,
        style: WidgetStyle,
    ) -> Self {
        Self { kind, bounds, style }
    }
}

/// Narrow interface to the GUI toolkit.
pub trait Toolkit: Send + Sync {
    /// Create a full-size screen root.
    fn create_screen(
        &self,
        style: WidgetStyle,
    ) -> Option<WidgetHandle>;

    /// Create a widget on `parent`.
    fn create_widget(
        &self,
        parent: WidgetHandle,
        def: WidgetDef,
    ) -> Option<WidgetHandle>;

    /// Delete a widget and everything created on it.
    fn delete(
        &self,
        handle: WidgetHandle,
    );

    fn set_hidden(
        &self,
        handle: WidgetHandle,
        hidden: bool,
    );

    fn is_hidden(
        &self,
        handle: WidgetHandle,
    ) -> bool;

    /// Replace label text or button/checkbox caption.
    fn set_text(
        &self,
        handle: WidgetHandle,
        text: &str,
    );

    fn text(
        &self,
        handle: WidgetHandle,
    ) -> Option<String>;

    /// Slider value. Clamped to the slider range.
    fn set_value(
        &self,
        handle: WidgetHandle,
        value: i32,
    );

    fn value(
        &self,
        handle: WidgetHandle,
    ) -> Option<i32>;

    fn set_checked(
        &self,
        handle: WidgetHandle,
        checked: bool,
    );

    fn is_checked(
        &self,
        handle: WidgetHandle,
    ) -> bool;

    /// Gauge needle value.
    fn set_needle(
        &self,
        handle: WidgetHandle,
        needle: usize,
        value: i32,
    );

    fn needle(
        &self,
        handle: WidgetHandle,
        needle: usize,
    ) -> Option<i32>;

    /// Shift a new point into a chart series.
    fn push_point(
        &self,
        handle: WidgetHandle,
        series: usize,
        value: i32,
    );

    fn series(
        &self,
        handle: WidgetHandle,
        series: usize,
    ) -> Vec<i32>;

    fn set_led(
        &self,
        handle: WidgetHandle,
        on: bool,
    );

    fn is_led_on(
        &self,
        handle: WidgetHandle,
    ) -> bool;

    /// Move a widget so its top-left corner is at `top_left`.
    fn set_position(
        &self,
        handle: WidgetHandle,
        top_left: Point,
    );

    /// Top-left corner of a widget, following its animation if it has one.
    fn position(
        &self,
        handle: WidgetHandle,
    ) -> Option<Point>;

    /// Make `screen` the visible root.
    fn load_screen(
        &self,
        screen: WidgetHandle,
    );

    fn active_screen(&self) -> Option<WidgetHandle>;

    /// Force a redraw of `handle` on the next task handler run.
    fn invalidate(
        &self,
        handle: WidgetHandle,
    );

    /// Advance the toolkit clock.
    fn tick_inc(
        &self,
        ms: u32,
    );

    fn tick_ms(&self) -> u64;

    /// Process input, animations and redraws. Returns the input events
    /// produced during this run, in order.
    fn task_handler(&self) -> Vec<ToolkitEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(_x: i32) -> i32 {
        7
    }

    #[test]
    fn test_animation_sweeps_and_plays_back() {
        let anim = Animation {
            from: 10,
            to: 290,
            sweep_ms: 4000,
            path: flat,
        };
        assert_eq!(anim.position(0), Point::new(10, 7));
        assert_eq!(anim.position(2000), Point::new(150, 7));
        assert_eq!(anim.position(4000), Point::new(290, 7));
        assert_eq!(anim.position(6000), Point::new(150, 7));
        assert_eq!(anim.position(8000), Point::new(10, 7));
    }

    #[test]
    fn test_handle_raw_roundtrip() {
        assert_eq!(WidgetHandle::from_raw(42).raw(), 42);
    }
}
