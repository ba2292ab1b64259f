//! Navigation controller: the screen state machine.
//!
//! Receives resolved widget events from the [`EventRegistry`], looks up the
//! [`Action`] in the transition table and executes it against the model, the
//! preload gate and the render queue. All transitions are synchronous except
//! Entry to Main, which is handed to the preload worker through the gate and
//! completed by [`NavigationController::finish_preload`].
//!
//! The controller owns the current [`Screen`]. Every open records the new
//! screen and queues the matching `Open` command under one lock, so the
//! toolkit's active root ends up equal to the recorded screen once the task
//! pump has drained the queue, whichever thread opened last.
//!
//! [`EventRegistry`]: crate::events::EventRegistry

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::DEFAULT_CURRENT_TEMP;
use crate::events::EventTarget;
use crate::preload::PreloadGate;
use crate::render::{RenderCommand, RenderSender};
use crate::screens::{Action, Control, Screen, ScreenSet, action_for};
use crate::temperature::TemperatureModel;
use crate::toolkit::{EventKind, Toolkit};

pub struct NavigationController {
    current: Mutex<Screen>,
    model: Arc<TemperatureModel>,
    gate: Arc<PreloadGate>,
    render: RenderSender,
    toolkit: Arc<dyn Toolkit>,
    screens: Arc<ScreenSet>,
}

impl NavigationController {
    pub fn new(
        model: Arc<TemperatureModel>,
        gate: Arc<PreloadGate>,
        render: RenderSender,
        toolkit: Arc<dyn Toolkit>,
        screens: Arc<ScreenSet>,
    ) -> Self {
        Self {
            current: Mutex::new(Screen::default()),
            model,
            gate,
            render,
            toolkit,
            screens,
        }
    }

    /// The screen most recently opened.
    #[inline]
    pub fn current(&self) -> Screen {
        *self.current.lock()
    }

    /// Make `screen` current and queue the toolkit switch. Idempotent.
    pub fn open(
        &self,
        screen: Screen,
    ) {
        let mut current = self.current.lock();
        if *current != screen {
            tracing::info!(from = current.name(), to = screen.name(), "navigating");
        }
        *current = screen;
        self.render.send(RenderCommand::Open(screen)).ok();
    }

    /// Complete the asynchronous Entry to Main transition. Called by the
    /// preload worker at the end of each cycle.
    pub fn finish_preload(&self) {
        self.gate.request_stop();
        if !self.model.is_simulate_active() {
            self.model.set_current(DEFAULT_CURRENT_TEMP);
        }
        self.open(Screen::Main);
    }

    /// Execute the table entry for an event, if any.
    pub fn handle(
        &self,
        screen: Screen,
        control: Control,
        kind: EventKind,
    ) {
        if let Some(action) = action_for(screen, control, kind) {
            self.perform(action);
        }
    }

    fn perform(
        &self,
        action: Action,
    ) {
        match action {
            Action::StartPreload => {
                self.model.reset_to_defaults();
                self.open(Screen::Entry);
                self.gate.request_start();
            }
            Action::ToggleSimulate => {
                let checked = self
                    .screens
                    .entry
                    .simulate
                    .is_some_and(|checkbox| self.toolkit.is_checked(checkbox));
                self.model.set_simulate_active(checked);
            }
            Action::ReturnToEntry => {
                self.render.send(RenderCommand::UncheckSimulate).ok();
                self.model.set_simulate_active(false);
                self.model.reset_to_defaults();
                self.open(Screen::Entry);
            }
            Action::SetWarning => {
                if let Some(value) = self.screens.main.slider.and_then(|slider| self.toolkit.value(slider)) {
                    self.model.set_warning(value);
                }
            }
            Action::Open(screen) => self.open(screen),
        }
    }
}

impl EventTarget for NavigationController {
    fn on_event(
        &self,
        screen: Screen,
        control: Control,
        kind: EventKind,
    ) {
        self.handle(screen, control, kind);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::config::DEFAULT_WARNING_TEMP;
    use crate::preload::PreloadWorker;
    use crate::render::{Renderer, channel};
    use crate::toolkit::FramebufferToolkit;

    struct Fixture {
        toolkit: Arc<FramebufferToolkit>,
        screens: Arc<ScreenSet>,
        model: Arc<TemperatureModel>,
        gate: Arc<PreloadGate>,
        controller: Arc<NavigationController>,
        renderer: Renderer,
    }

    impl Fixture {
        fn new() -> Self {
            let toolkit = Arc::new(FramebufferToolkit::new(320, 240));
            let (tx, rx) = channel();
            let model = Arc::new(TemperatureModel::new(tx.clone()));
            let screens = Arc::new(ScreenSet::build(toolkit.as_ref()));
            let gate = Arc::new(PreloadGate::new());
            let dyn_toolkit: Arc<dyn Toolkit> = toolkit.clone();
            let controller = Arc::new(NavigationController::new(
                model.clone(),
                gate.clone(),
                tx,
                dyn_toolkit,
                screens.clone(),
            ));
            let renderer = Renderer::new(rx, screens.clone());
            Self {
                toolkit,
                screens,
                model,
                gate,
                controller,
                renderer,
            }
        }

        fn click(
            &self,
            control: Control,
        ) {
            self.controller.handle(self.controller.current(), control, EventKind::Clicked);
            self.renderer.apply_pending(self.toolkit.as_ref());
        }

        fn active_is(
            &self,
            screen: Screen,
        ) -> bool {
            self.toolkit.active_screen() == self.screens.root(screen)
        }
    }

    #[test]
    fn test_starts_on_entry() {
        let fx = Fixture::new();
        assert_eq!(fx.controller.current(), Screen::Entry);
    }

    #[test]
    fn test_start_then_preload_completes_on_main() {
        let fx = Fixture::new();
        let mut worker = {
            let controller = fx.controller.clone();
            PreloadWorker::spawn(fx.gate.clone(), move || controller.finish_preload()).unwrap()
        };

        fx.click(Control::Start);
        let deadline = Instant::now() + Duration::from_secs(2);
        while fx.controller.current() != Screen::Main && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        // Stop was requested before Main opened; shutdown sets it again to wake the worker
        assert!(!fx.gate.is_started());
        worker.shutdown();
        fx.renderer.apply_pending(fx.toolkit.as_ref());

        assert_eq!(fx.controller.current(), Screen::Main);
        assert!(fx.active_is(Screen::Main));
        assert_eq!(fx.model.current(), DEFAULT_CURRENT_TEMP);
    }

    #[test]
    fn test_start_click_only_requests_preload() {
        let fx = Fixture::new();
        fx.model.set_current(3);
        fx.click(Control::Start);
        assert_eq!(fx.controller.current(), Screen::Entry);
        assert!(fx.active_is(Screen::Entry));
        assert!(fx.gate.is_started());
        assert_eq!(fx.model.current(), DEFAULT_CURRENT_TEMP);
    }

    #[test]
    fn test_next_next_prev_lands_on_chart() {
        let fx = Fixture::new();
        fx.controller.open(Screen::Main);
        fx.click(Control::Next);
        fx.click(Control::Next);
        assert_eq!(fx.controller.current(), Screen::Image);
        fx.click(Control::Prev);
        assert_eq!(fx.controller.current(), Screen::Chart);
        assert!(fx.active_is(Screen::Chart));
    }

    #[test]
    fn test_chart_prev_opens_main_without_preload() {
        let fx = Fixture::new();
        fx.controller.open(Screen::Chart);
        fx.click(Control::Prev);
        assert_eq!(fx.controller.current(), Screen::Main);
        assert!(!fx.gate.is_started());
    }

    #[test]
    fn test_simulate_toggle_keeps_screen() {
        let fx = Fixture::new();
        let checkbox = fx.screens.entry.simulate.unwrap();

        fx.toolkit.set_checked(checkbox, true);
        fx.controller.handle(Screen::Entry, Control::Simulate, EventKind::ValueChanged);
        assert!(fx.model.is_simulate_active());

        fx.toolkit.set_checked(checkbox, false);
        fx.controller.handle(Screen::Entry, Control::Simulate, EventKind::ValueChanged);
        assert!(!fx.model.is_simulate_active());
        assert_eq!(fx.controller.current(), Screen::Entry);
    }

    #[test]
    fn test_slider_sets_warning() {
        let fx = Fixture::new();
        fx.controller.open(Screen::Main);
        fx.toolkit.set_value(fx.screens.main.slider.unwrap(), 12);
        fx.controller.handle(Screen::Main, Control::WarningSlider, EventKind::ValueChanged);
        assert_eq!(fx.model.warning(), 12);
        assert!(fx.model.alert());
    }

    #[test]
    fn test_main_prev_resets_entry() {
        let fx = Fixture::new();
        let checkbox = fx.screens.entry.simulate.unwrap();
        fx.toolkit.set_checked(checkbox, true);
        fx.model.set_simulate_active(true);
        fx.model.set_current(33);
        fx.model.set_warning(5);
        fx.controller.open(Screen::Main);

        fx.click(Control::Prev);

        assert_eq!(fx.controller.current(), Screen::Entry);
        assert!(fx.active_is(Screen::Entry));
        assert!(!fx.model.is_simulate_active());
        assert!(!fx.toolkit.is_checked(checkbox));
        assert_eq!(fx.model.current(), DEFAULT_CURRENT_TEMP);
        assert_eq!(fx.model.warning(), DEFAULT_WARNING_TEMP);
    }

    #[test]
    fn test_finish_preload_keeps_simulated_value() {
        let fx = Fixture::new();
        fx.model.set_simulate_active(true);
        fx.model.set_current(7);
        fx.gate.request_start();
        fx.controller.finish_preload();
        assert_eq!(fx.model.current(), 7);
        assert!(!fx.gate.is_started());
        assert_eq!(fx.controller.current(), Screen::Main);
    }
}
