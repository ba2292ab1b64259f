//! Retained-mode toolkit rendering into a [`FrameBuffer`].
//!
//! Widgets live in a handle-keyed tree behind one mutex; the rendered frame
//! sits behind a second one so the display driver can copy it out while the
//! task pump is idle. Lock order is always widget tree, then framebuffer.
//!
//! # Input
//!
//! The display driver feeds raw pointer samples through [`pointer`]. They are
//! queued and only interpreted inside [`Toolkit::task_handler`], which turns
//! press/release pairs into [`ToolkitEvent`]s:
//!
//! - Button: `Clicked` when pressed and released on the same button
//! - Checkbox: toggles, then `ValueChanged` followed by `Clicked`
//! - Slider: value follows the pointer while pressed, `ValueChanged` per change
//!
//! [`pointer`]: FramebufferToolkit::pointer

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use parking_lot::Mutex;

use super::display::FrameBuffer;
use super::draw;
use super::{Animation, EventKind, GaugeScale, Toolkit, ToolkitEvent, WidgetHandle, WidgetKind, WidgetDef};
use crate::styles::WidgetStyle;

// =============================================================================
// Widget Tree
// =============================================================================

/// Per-kind widget state.
#[derive(Debug)]
enum NodeState {
    Screen,
    Label {
        text: String,
    },
    Button {
        caption: String,
    },
    Checkbox {
        caption: String,
        checked: bool,
    },
    Slider {
        min: i32,
        max: i32,
        value: i32,
    },
    Gauge {
        scale: GaugeScale,
        needles: [i32; 2],
    },
    Chart {
        min: i32,
        max: i32,
        points: usize,
        divisions: i32,
        series: Vec<(Rgb565, Vec<i32>)>,
    },
    Led {
        on: bool,
    },
    Image {
        animation: Option<Animation>,
        position: Point,
    },
    Spinner {
        spin_ms: u32,
        arc_deg: u32,
    },
}

impl NodeState {
    fn from_kind(
        kind: WidgetKind,
        bounds: &Rectangle,
    ) -> Self {
        match kind {
            WidgetKind::Label { text } => Self::Label { text },
            WidgetKind::Button { caption } => Self::Button { caption },
            WidgetKind::Checkbox { caption } => Self::Checkbox { caption, checked: false },
            WidgetKind::Slider { min, max } => Self::Slider { min, max, value: min },
            WidgetKind::Gauge(scale) => Self::Gauge {
                scale,
                needles: [scale.min; 2],
            },
            WidgetKind::Chart {
                min,
                max,
                points,
                divisions,
                series,
            } => Self::Chart {
                min,
                max,
                points,
                divisions,
                series: series.into_iter().map(|color| (color, Vec::with_capacity(points))).collect(),
            },
            WidgetKind::Led => Self::Led { on: false },
            WidgetKind::Image { animation } => Self::Image {
                animation,
                position: bounds.top_left,
            },
            WidgetKind::Spinner { spin_ms, arc_deg } => Self::Spinner { spin_ms, arc_deg },
        }
    }

    /// Whether the widget reacts to pointer input.
    const fn is_interactive(&self) -> bool {
        matches!(self, Self::Button { .. } | Self::Checkbox { .. } | Self::Slider { .. })
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<WidgetHandle>,
    bounds: Rectangle,
    style: WidgetStyle,
    hidden: bool,
    state: NodeState,
}

/// One queued pointer sample from the input driver.
#[derive(Clone, Copy, Debug)]
struct PointerSample {
    point: Point,
    pressed: bool,
}

struct Inner {
    nodes: BTreeMap<WidgetHandle, Node>,
    next_id: u32,
    capacity: Option<usize>,
    active: Option<WidgetHandle>,
    dirty: bool,
    input: VecDeque<PointerSample>,
    pressed: bool,
    pressed_on: Option<WidgetHandle>,
    frames: u64,
}

impl Inner {
    fn insert(
        &mut self,
        node: Node,
    ) -> Option<WidgetHandle> {
        if self.capacity.is_some_and(|cap| self.nodes.len() >= cap) {
            return None;
        }
        self.next_id = self.next_id.checked_add(1)?;
        let handle = WidgetHandle::from_raw(self.next_id);
        self.nodes.insert(handle, node);
        self.dirty = true;
        Some(handle)
    }

    fn state_mut(
        &mut self,
        handle: WidgetHandle,
    ) -> Option<&mut NodeState> {
        self.nodes.get_mut(&handle).map(|node| &mut node.state)
    }

    /// Visible widgets on the active screen, in creation order.
    fn visible_children(&self) -> impl DoubleEndedIterator<Item = (&WidgetHandle, &Node)> {
        let active = self.active;
        self.nodes
            .iter()
            .filter(move |(_, node)| active.is_some() && node.parent == active && !node.hidden)
    }

    /// Topmost interactive widget under `point`.
    fn hit_test(
        &self,
        point: Point,
    ) -> Option<WidgetHandle> {
        self.visible_children()
            .rev()
            .find(|(_, node)| node.state.is_interactive() && node.bounds.contains(point))
            .map(|(handle, _)| *handle)
    }

    /// Move a slider to the value under `point`. Returns `true` on change.
    fn drag_slider(
        &mut self,
        handle: WidgetHandle,
        point: Point,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&handle) else {
            return false;
        };
        let offset = point.x - node.bounds.top_left.x;
        let width = node.bounds.size.width;
        if let NodeState::Slider { min, max, value } = &mut node.state {
            let next = draw::slider_value_at(offset, *min, *max, width);
            if next != *value {
                *value = next;
                return true;
            }
        }
        false
    }

    fn process_input(
        &mut self,
        events: &mut Vec<ToolkitEvent>,
    ) {
        while let Some(sample) = self.input.pop_front() {
            match (self.pressed, sample.pressed) {
                (false, true) => {
                    self.pressed_on = self.hit_test(sample.point);
                    if let Some(target) = self.pressed_on {
                        self.dirty = true;
                        if self.drag_slider(target, sample.point) {
                            events.push(ToolkitEvent {
                                target,
                                kind: EventKind::ValueChanged,
                            });
                        }
                    }
                }
                (true, true) => {
                    if let Some(target) = self.pressed_on {
                        if self.drag_slider(target, sample.point) {
                            self.dirty = true;
                            events.push(ToolkitEvent {
                                target,
                                kind: EventKind::ValueChanged,
                            });
                        }
                    }
                }
                (true, false) => {
                    if let Some(target) = self.pressed_on.take() {
                        self.dirty = true;
                        if self.hit_test(sample.point) == Some(target) {
                            self.release_on(target, events);
                        }
                    }
                }
                (false, false) => {}
            }
            self.pressed = sample.pressed;
        }
    }

    fn release_on(
        &mut self,
        target: WidgetHandle,
        events: &mut Vec<ToolkitEvent>,
    ) {
        if let Some(NodeState::Checkbox { checked, .. }) = self.state_mut(target) {
            *checked = !*checked;
            events.push(ToolkitEvent {
                target,
                kind: EventKind::ValueChanged,
            });
        }
        events.push(ToolkitEvent {
            target,
            kind: EventKind::Clicked,
        });
    }

    /// Advance animations on the active screen. Returns `true` if anything moved.
    fn animate(
        &mut self,
        tick_ms: u64,
    ) -> bool {
        let active = self.active;
        let mut moved = false;
        for node in self.nodes.values_mut().filter(|node| node.parent == active && !node.hidden) {
            match &mut node.state {
                NodeState::Image {
                    animation: Some(animation),
                    position,
                } => {
                    let next = animation.position(tick_ms);
                    if next != *position {
                        *position = next;
                        moved = true;
                    }
                }
                NodeState::Spinner { .. } => moved = true,
                _ => {}
            }
        }
        moved
    }

    fn render(
        &self,
        fb: &mut FrameBuffer,
        tick_ms: u64,
    ) {
        let Some(screen) = self.active.and_then(|handle| self.nodes.get(&handle)) else {
            return;
        };
        let full = fb.bounding_box();
        draw::draw_screen(fb, full, &screen.style);

        for (handle, node) in self.visible_children() {
            let style = &node.style;
            match &node.state {
                NodeState::Screen => {}
                NodeState::Label { text } => draw::draw_label(fb, node.bounds, text, style),
                NodeState::Button { caption } => {
                    let pressed = self.pressed && self.pressed_on == Some(*handle);
                    draw::draw_button(fb, node.bounds, caption, pressed, style);
                }
                NodeState::Checkbox { caption, checked } => {
                    draw::draw_checkbox(fb, node.bounds, caption, *checked, style);
                }
                NodeState::Slider { min, max, value } => {
                    draw::draw_slider(fb, node.bounds, *min, *max, *value, style);
                }
                NodeState::Gauge { scale, needles } => draw::draw_gauge(fb, node.bounds, scale, needles, style),
                NodeState::Chart {
                    min,
                    max,
                    points,
                    divisions,
                    series,
                } => {
                    let series = series.iter().map(|(color, samples)| (*color, samples.as_slice()));
                    draw::draw_chart(fb, node.bounds, *min, *max, *points, *divisions, series, style);
                }
                NodeState::Led { on } => draw::draw_led(fb, node.bounds, *on, style),
                NodeState::Image { position, .. } => draw::draw_image(fb, *position, node.bounds.size, style),
                NodeState::Spinner { spin_ms, arc_deg } => {
                    draw::draw_spinner(fb, node.bounds, tick_ms, *spin_ms, *arc_deg, style);
                }
            }
        }
    }
}

// =============================================================================
// Toolkit
// =============================================================================

/// Headless toolkit drawing into an in-memory framebuffer.
///
/// Safe to share between threads. All widget state is behind one lock, so a
/// widget change from the preload worker cannot tear a frame being rendered by
/// the task pump.
pub struct FramebufferToolkit {
    ticks: AtomicU64,
    inner: Mutex<Inner>,
    framebuffer: Mutex<FrameBuffer>,
}

impl FramebufferToolkit {
    /// Toolkit with an unlimited object pool.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self::build(width, height, None)
    }

    /// Toolkit that refuses to create more than `max_objects` objects.
    pub fn with_capacity(
        width: u32,
        height: u32,
        max_objects: usize,
    ) -> Self {
        Self::build(width, height, Some(max_objects))
    }

    fn build(
        width: u32,
        height: u32,
        capacity: Option<usize>,
    ) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                nodes: BTreeMap::new(),
                next_id: 0,
                capacity,
                active: None,
                dirty: true,
                input: VecDeque::new(),
                pressed: false,
                pressed_on: None,
                frames: 0,
            }),
            framebuffer: Mutex::new(FrameBuffer::new(width, height)),
        }
    }

    /// Queue a pointer sample from the input driver.
    pub fn pointer(
        &self,
        point: Point,
        pressed: bool,
    ) {
        self.inner.lock().input.push_back(PointerSample { point, pressed });
    }

    /// Queue a press and release at the center of `handle`.
    pub fn click(
        &self,
        handle: WidgetHandle,
    ) {
        let mut inner = self.inner.lock();
        let Some(center) = inner.nodes.get(&handle).map(|node| node.bounds.center()) else {
            return;
        };
        inner.input.push_back(PointerSample {
            point: center,
            pressed: true,
        });
        inner.input.push_back(PointerSample {
            point: center,
            pressed: false,
        });
    }

    /// Queue a press and release on a slider at the position of `value`.
    pub fn slide_to(
        &self,
        handle: WidgetHandle,
        value: i32,
    ) {
        let mut inner = self.inner.lock();
        let Some(node) = inner.nodes.get(&handle) else {
            return;
        };
        let NodeState::Slider { min, max, .. } = node.state else {
            return;
        };
        let offset = draw::slider_offset(value, min, max, node.bounds.size.width);
        let point = Point::new(node.bounds.top_left.x + offset, node.bounds.center().y);
        inner.input.push_back(PointerSample { point, pressed: true });
        inner.input.push_back(PointerSample { point, pressed: false });
    }

    /// Run `f` on the last rendered frame.
    pub fn with_framebuffer<R>(
        &self,
        f: impl FnOnce(&FrameBuffer) -> R,
    ) -> R {
        f(&self.framebuffer.lock())
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.inner.lock().frames
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    /// Apply `f` to the state of `handle` and flag a redraw.
    fn update(
        &self,
        handle: WidgetHandle,
        f: impl FnOnce(&mut NodeState),
    ) {
        let mut inner = self.inner.lock();
        if let Some(state) = inner.state_mut(handle) {
            f(state);
            inner.dirty = true;
        }
    }

    fn read<R>(
        &self,
        handle: WidgetHandle,
        f: impl FnOnce(&NodeState) -> Option<R>,
    ) -> Option<R> {
        self.inner.lock().nodes.get(&handle).and_then(|node| f(&node.state))
    }
}

impl Toolkit for FramebufferToolkit {
    fn create_screen(
        &self,
        style: WidgetStyle,
    ) -> Option<WidgetHandle> {
        let bounds = self.framebuffer.lock().bounding_box();
        self.inner.lock().insert(Node {
            parent: None,
            bounds,
            style,
            hidden: false,
            state: NodeState::Screen,
        })
    }

    fn create_widget(
        &self,
        parent: WidgetHandle,
        def: WidgetDef,
    ) -> Option<WidgetHandle> {
        let mut inner = self.inner.lock();
        if !inner.nodes.contains_key(&parent) {
            return None;
        }
        let state = NodeState::from_kind(def.kind, &def.bounds);
        inner.insert(Node {
            parent: Some(parent),
            bounds: def.bounds,
            style: def.style,
            hidden: false,
            state,
        })
    }

    fn delete(
        &self,
        handle: WidgetHandle,
    ) {
        let mut inner = self.inner.lock();
        let mut doomed = vec![handle];
        let mut idx = 0;
        while let Some(&current) = doomed.get(idx) {
            doomed.extend(
                inner
                    .nodes
                    .iter()
                    .filter(|(_, node)| node.parent == Some(current))
                    .map(|(child, _)| *child),
            );
            idx += 1;
        }
        for dead in &doomed {
            inner.nodes.remove(dead);
            if inner.active == Some(*dead) {
                inner.active = None;
            }
            if inner.pressed_on == Some(*dead) {
                inner.pressed_on = None;
            }
        }
        inner.dirty = true;
    }

    fn set_hidden(
        &self,
        handle: WidgetHandle,
        hidden: bool,
    ) {
        let mut inner = self.inner.lock();
        if let Some(node) = inner.nodes.get_mut(&handle) {
            node.hidden = hidden;
            inner.dirty = true;
        }
    }

    fn is_hidden(
        &self,
        handle: WidgetHandle,
    ) -> bool {
        self.inner.lock().nodes.get(&handle).is_some_and(|node| node.hidden)
    }

    fn set_text(
        &self,
        handle: WidgetHandle,
        text: &str,
    ) {
        self.update(handle, |state| match state {
            NodeState::Label { text: current }
            | NodeState::Button { caption: current }
            | NodeState::Checkbox { caption: current, .. } => {
                current.clear();
                current.push_str(text);
            }
            _ => {}
        });
    }

    fn text(
        &self,
        handle: WidgetHandle,
    ) -> Option<String> {
        self.read(handle, |state| match state {
            NodeState::Label { text } | NodeState::Button { caption: text } | NodeState::Checkbox { caption: text, .. } => {
                Some(text.clone())
            }
            _ => None,
        })
    }

    fn set_value(
        &self,
        handle: WidgetHandle,
        new: i32,
    ) {
        self.update(handle, |state| {
            if let NodeState::Slider { min, max, value } = state {
                *value = new.clamp(*min, *max);
            }
        });
    }

    fn value(
        &self,
        handle: WidgetHandle,
    ) -> Option<i32> {
        self.read(handle, |state| match state {
            NodeState::Slider { value, .. } => Some(*value),
            _ => None,
        })
    }

    fn set_checked(
        &self,
        handle: WidgetHandle,
        new: bool,
    ) {
        self.update(handle, |state| {
            if let NodeState::Checkbox { checked, .. } = state {
                *checked = new;
            }
        });
    }

    fn is_checked(
        &self,
        handle: WidgetHandle,
    ) -> bool {
        self.read(handle, |state| match state {
            NodeState::Checkbox { checked, .. } => Some(*checked),
            _ => None,
        })
        .unwrap_or(false)
    }

    fn set_needle(
        &self,
        handle: WidgetHandle,
        needle: usize,
        value: i32,
    ) {
        self.update(handle, |state| {
            if let NodeState::Gauge { scale, needles } = state {
                if let Some(slot) = needles.get_mut(needle) {
                    *slot = value.clamp(scale.min, scale.max);
                }
            }
        });
    }

    fn needle(
        &self,
        handle: WidgetHandle,
        needle: usize,
    ) -> Option<i32> {
        self.read(handle, |state| match state {
            NodeState::Gauge { needles, .. } => needles.get(needle).copied(),
            _ => None,
        })
    }

    fn push_point(
        &self,
        handle: WidgetHandle,
        series: usize,
        value: i32,
    ) {
        self.update(handle, |state| {
            if let NodeState::Chart {
                min,
                max,
                points,
                series: all,
                ..
            } = state
            {
                if let Some((_, samples)) = all.get_mut(series) {
                    if samples.len() >= *points {
                        samples.remove(0);
                    }
                    samples.push(value.clamp(*min, *max));
                }
            }
        });
    }

    fn series(
        &self,
        handle: WidgetHandle,
        series: usize,
    ) -> Vec<i32> {
        self.read(handle, |state| match state {
            NodeState::Chart { series: all, .. } => all.get(series).map(|(_, samples)| samples.clone()),
            _ => None,
        })
        .unwrap_or_default()
    }

    fn set_led(
        &self,
        handle: WidgetHandle,
        new: bool,
    ) {
        self.update(handle, |state| {
            if let NodeState::Led { on } = state {
                *on = new;
            }
        });
    }

    fn is_led_on(
        &self,
        handle: WidgetHandle,
    ) -> bool {
        self.read(handle, |state| match state {
            NodeState::Led { on } => Some(*on),
            _ => None,
        })
        .unwrap_or(false)
    }

    fn set_position(
        &self,
        handle: WidgetHandle,
        top_left: Point,
    ) {
        let mut inner = self.inner.lock();
        if let Some(node) = inner.nodes.get_mut(&handle) {
            node.bounds.top_left = top_left;
            if let NodeState::Image { position, .. } = &mut node.state {
                *position = top_left;
            }
            inner.dirty = true;
        }
    }

    fn position(
        &self,
        handle: WidgetHandle,
    ) -> Option<Point> {
        let inner = self.inner.lock();
        let node = inner.nodes.get(&handle)?;
        match node.state {
            NodeState::Image { position, .. } => Some(position),
            _ => Some(node.bounds.top_left),
        }
    }

    fn load_screen(
        &self,
        screen: WidgetHandle,
    ) {
        let mut inner = self.inner.lock();
        if matches!(inner.nodes.get(&screen).map(|node| &node.state), Some(NodeState::Screen)) {
            inner.active = Some(screen);
            inner.dirty = true;
        }
    }

    fn active_screen(&self) -> Option<WidgetHandle> {
        self.inner.lock().active
    }

    fn invalidate(
        &self,
        handle: WidgetHandle,
    ) {
        let mut inner = self.inner.lock();
        if inner.nodes.contains_key(&handle) {
            inner.dirty = true;
        }
    }

    fn tick_inc(
        &self,
        ms: u32,
    ) {
        self.ticks.fetch_add(u64::from(ms), Ordering::Relaxed);
    }

    fn tick_ms(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn task_handler(&self) -> Vec<ToolkitEvent> {
        let tick_ms = self.tick_ms();
        let mut events = Vec::new();
        let mut inner = self.inner.lock();

        inner.process_input(&mut events);
        if inner.animate(tick_ms) {
            inner.dirty = true;
        }

        if inner.dirty && inner.active.is_some() {
            let mut fb = self.framebuffer.lock();
            inner.render(&mut fb, tick_ms);
            inner.dirty = false;
            inner.frames += 1;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, ORANGE, WHITE};
    use crate::styles::{BUTTON, CHART, CHECKBOX, SCREEN_LIGHT, SLIDER};

    fn rect(
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    ) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    fn screen_with(
        tk: &FramebufferToolkit,
        kind: WidgetKind,
        bounds: Rectangle,
        style: WidgetStyle,
    ) -> (WidgetHandle, WidgetHandle) {
        let screen = tk.create_screen(SCREEN_LIGHT).unwrap();
        let widget = tk.create_widget(screen, WidgetDef::new(kind, bounds, style)).unwrap();
        tk.load_screen(screen);
        (screen, widget)
    }

    #[test]
    fn test_click_on_button_emits_clicked() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Start".to_string();
        let (_, button) = screen_with(&tk, WidgetKind::Button { caption }, rect(100, 100, 120, 40), BUTTON);

        tk.click(button);
        let events = tk.task_handler();
        assert_eq!(
            events,
            vec![ToolkitEvent {
                target: button,
                kind: EventKind::Clicked
            }]
        );
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Start".to_string();
        let (_, _button) = screen_with(&tk, WidgetKind::Button { caption }, rect(100, 100, 120, 40), BUTTON);

        tk.pointer(Point::new(150, 120), true);
        tk.pointer(Point::new(5, 5), false);
        assert!(tk.task_handler().is_empty());
    }

    #[test]
    fn test_checkbox_toggles_with_value_changed() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Simulate".to_string();
        let (_, cb) = screen_with(&tk, WidgetKind::Checkbox { caption }, rect(40, 160, 240, 30), CHECKBOX);

        tk.click(cb);
        let kinds: Vec<_> = tk.task_handler().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::ValueChanged, EventKind::Clicked]);
        assert!(tk.is_checked(cb));

        tk.click(cb);
        tk.task_handler();
        assert!(!tk.is_checked(cb));
    }

    #[test]
    fn test_slider_follows_pointer() {
        let tk = FramebufferToolkit::new(320, 240);
        let (_, slider) = screen_with(&tk, WidgetKind::Slider { min: 0, max: 35 }, rect(20, 200, 280, 16), SLIDER);

        tk.slide_to(slider, 28);
        let events = tk.task_handler();
        assert_eq!(events.first().map(|e| e.kind), Some(EventKind::ValueChanged));
        assert_eq!(tk.value(slider), Some(28));
    }

    #[test]
    fn test_hidden_widget_ignores_input() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Start".to_string();
        let (_, button) = screen_with(&tk, WidgetKind::Button { caption }, rect(100, 100, 120, 40), BUTTON);
        tk.set_hidden(button, true);

        tk.click(button);
        assert!(tk.task_handler().is_empty());
        assert!(tk.is_hidden(button));
    }

    #[test]
    fn test_widgets_on_inactive_screen_ignore_input() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Start".to_string();
        let (_, button) = screen_with(&tk, WidgetKind::Button { caption }, rect(100, 100, 120, 40), BUTTON);
        let other = tk.create_screen(SCREEN_LIGHT).unwrap();
        tk.load_screen(other);

        tk.click(button);
        assert!(tk.task_handler().is_empty());
        assert_eq!(tk.active_screen(), Some(other));
    }

    #[test]
    fn test_capacity_exhaustion_returns_none() {
        let tk = FramebufferToolkit::with_capacity(320, 240, 1);
        let screen = tk.create_screen(SCREEN_LIGHT).unwrap();
        let def = WidgetDef::new(WidgetKind::Led, rect(0, 0, 10, 10), SCREEN_LIGHT);
        assert!(tk.create_widget(screen, def).is_none());

        // Operations on a missing handle are no-ops
        let ghost = WidgetHandle::from_raw(999);
        tk.set_led(ghost, true);
        assert!(!tk.is_led_on(ghost));
    }

    #[test]
    fn test_delete_removes_children() {
        let tk = FramebufferToolkit::new(320, 240);
        let (screen, led) = screen_with(&tk, WidgetKind::Led, rect(0, 0, 10, 10), SCREEN_LIGHT);
        assert_eq!(tk.object_count(), 2);

        tk.delete(screen);
        assert_eq!(tk.object_count(), 0);
        assert_eq!(tk.active_screen(), None);
        assert!(tk.text(led).is_none());
    }

    #[test]
    fn test_chart_shifts_oldest_point_out() {
        let tk = FramebufferToolkit::new(320, 240);
        let kind = WidgetKind::Chart {
            min: 0,
            max: 35,
            points: 3,
            divisions: 4,
            series: vec![BLUE, ORANGE],
        };
        let (_, chart) = screen_with(&tk, kind, rect(10, 10, 300, 180), CHART);

        for value in [1, 2, 3, 99] {
            tk.push_point(chart, 0, value);
        }
        assert_eq!(tk.series(chart, 0), vec![2, 3, 35]);
        assert!(tk.series(chart, 1).is_empty());
        assert!(tk.series(chart, 7).is_empty());
    }

    #[test]
    fn test_render_only_when_dirty() {
        let tk = FramebufferToolkit::new(32, 24);
        let screen = tk.create_screen(SCREEN_LIGHT).unwrap();
        tk.load_screen(screen);

        tk.task_handler();
        assert_eq!(tk.frames_rendered(), 1);
        tk.task_handler();
        assert_eq!(tk.frames_rendered(), 1);
        assert_eq!(tk.with_framebuffer(|fb| fb.pixel(Point::new(3, 3))), Some(WHITE));

        tk.invalidate(screen);
        tk.task_handler();
        assert_eq!(tk.frames_rendered(), 2);
    }

    #[test]
    fn test_image_animation_moves_with_ticks() {
        fn level(_x: i32) -> i32 {
            50
        }
        let tk = FramebufferToolkit::new(320, 240);
        let animation = Animation {
            from: 10,
            to: 290,
            sweep_ms: 4000,
            path: level,
        };
        let kind = WidgetKind::Image {
            animation: Some(animation),
        };
        let (_, image) = screen_with(&tk, kind, rect(10, 50, 20, 20), SCREEN_LIGHT);

        tk.tick_inc(2000);
        tk.task_handler();
        assert_eq!(tk.position(image), Some(Point::new(150, 50)));
    }

    #[test]
    fn test_set_position_moves_hit_area() {
        let tk = FramebufferToolkit::new(320, 240);
        let caption = "Next".to_string();
        let (_, button) = screen_with(&tk, WidgetKind::Button { caption }, rect(0, 0, 40, 25), BUTTON);

        tk.set_position(button, Point::new(270, 10));
        assert_eq!(tk.position(button), Some(Point::new(270, 10)));

        tk.pointer(Point::new(20, 12), true);
        tk.pointer(Point::new(20, 12), false);
        assert!(tk.task_handler().is_empty());

        tk.click(button);
        assert_eq!(tk.task_handler().len(), 1);
    }
}
