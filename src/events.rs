//! Widget handle to controller dispatch.
//!
//! Toolkit events only carry the target [`WidgetHandle`]. The registry maps
//! each interactive widget to the screen and control it represents and to the
//! [`EventTarget`] that handles it. Targets are held weakly: a controller that
//! has been dropped simply stops receiving events.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::screens::{Control, Screen, ScreenSet};
use crate::toolkit::{EventKind, ToolkitEvent, WidgetHandle};

/// Receiver of resolved widget events.
pub trait EventTarget: Send + Sync {
    fn on_event(
        &self,
        screen: Screen,
        control: Control,
        kind: EventKind,
    );
}

struct Binding {
    screen: Screen,
    control: Control,
    target: Weak<dyn EventTarget>,
}

/// Explicit handle to (screen, control, target) table.
#[derive(Default)]
pub struct EventRegistry {
    bindings: HashMap<WidgetHandle, Binding>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle`. A previous binding for the same handle is replaced.
    pub fn bind(
        &mut self,
        handle: WidgetHandle,
        screen: Screen,
        control: Control,
        target: &Arc<dyn EventTarget>,
    ) {
        let binding = Binding {
            screen,
            control,
            target: Arc::downgrade(target),
        };
        if self.bindings.insert(handle, binding).is_some() {
            tracing::debug!(handle = handle.raw(), "widget binding replaced");
        }
    }

    /// Bind every interactive widget of `screens` to `target`.
    pub fn bind_screens(
        &mut self,
        screens: &ScreenSet,
        target: &Arc<dyn EventTarget>,
    ) {
        for (handle, screen, control) in screens.bindings() {
            self.bind(handle, screen, control, target);
        }
    }

    pub fn unbind(
        &mut self,
        handle: WidgetHandle,
    ) {
        self.bindings.remove(&handle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Deliver events in order. Unbound handles and dropped targets are
    /// skipped. Returns the number of events delivered.
    pub fn dispatch<I>(
        &self,
        events: I,
    ) -> usize
    where
        I: IntoIterator<Item = ToolkitEvent>,
    {
        let mut delivered = 0;
        for event in events {
            let Some(binding) = self.bindings.get(&event.target) else {
                tracing::trace!(handle = event.target.raw(), "event for unbound widget");
                continue;
            };
            let Some(target) = binding.target.upgrade() else {
                tracing::debug!(handle = event.target.raw(), "event target dropped");
                continue;
            };
            tracing::debug!(
                screen = binding.screen.name(),
                control = ?binding.control,
                kind = ?event.kind,
                "dispatching event"
            );
            target.on_event(binding.screen, binding.control, event.kind);
            delivered += 1;
        }
        delivered
    }
}
