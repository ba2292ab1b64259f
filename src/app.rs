//! Panel assembly and lifecycle.
//!
//! [`Panel`] is the single long-lived instance that owns every thread.
//!
//! # Construction Order
//!
//! 1. Render queue
//! 2. Temperature model
//! 3. Screens (published with default readings, Entry opened)
//! 4. Preload gate, navigation controller, event registry
//! 5. Preload worker
//! 6. Temperature simulator
//! 7. Tick and task pumps
//!
//! # Teardown Order
//!
//! Pumps first, so nothing enters the toolkit anymore. Then the simulator,
//! then the preload worker (gate disabled before the join). Screen widgets are
//! deleted last. `shutdown()` and `Drop` run the same sequence once.

use std::sync::Arc;

use crate::config::TimingConfig;
use crate::error::Result;
use crate::events::{EventRegistry, EventTarget};
use crate::navigation::NavigationController;
use crate::preload::{PreloadGate, PreloadWorker};
use crate::pump::UiPump;
use crate::render::{self, Renderer};
use crate::screens::{Screen, ScreenSet, Splash};
use crate::simulation::TemperatureSimulator;
use crate::temperature::TemperatureModel;
use crate::toolkit::Toolkit;

/// Worker threads, in construction order.
struct Workers {
    preload: PreloadWorker,
    simulator: TemperatureSimulator,
    pump: UiPump,
}

/// The running panel.
pub struct Panel {
    toolkit: Arc<dyn Toolkit>,
    screens: Arc<ScreenSet>,
    model: Arc<TemperatureModel>,
    controller: Arc<NavigationController>,
    workers: Option<Workers>,
}

impl Panel {
    /// Build the screens and start all threads.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Spawn`](crate::error::PanelError::Spawn) if a
    /// worker thread cannot be started. Threads already running are stopped
    /// and the screens deleted before returning.
    pub fn new(
        toolkit: Arc<dyn Toolkit>,
        timing: TimingConfig,
    ) -> Result<Self> {
        let (render_tx, render_rx) = render::channel();
        let model = Arc::new(TemperatureModel::new(render_tx.clone()));
        let screens = Arc::new(ScreenSet::build(toolkit.as_ref()));

        let gate = Arc::new(PreloadGate::new());
        let controller = Arc::new(NavigationController::new(
            model.clone(),
            gate.clone(),
            render_tx,
            toolkit.clone(),
            screens.clone(),
        ));
        let mut registry = EventRegistry::new();
        let target: Arc<dyn EventTarget> = controller.clone();
        registry.bind_screens(&screens, &target);

        // Initial widget values, then the first screen
        model.reset_to_defaults();
        controller.open(Screen::Entry);

        let renderer = Renderer::new(render_rx, screens.clone());
        let workers = match Self::start_workers(&toolkit, &screens, &model, &controller, gate, renderer, registry, &timing)
        {
            Ok(workers) => workers,
            Err(err) => {
                tracing::error!(thread = err.thread(), "panel start-up failed: {err}");
                screens.destroy(toolkit.as_ref());
                return Err(err);
            }
        };

        tracing::info!("panel running");
        Ok(Self {
            toolkit,
            screens,
            model,
            controller,
            workers: Some(workers),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn start_workers(
        toolkit: &Arc<dyn Toolkit>,
        screens: &Arc<ScreenSet>,
        model: &Arc<TemperatureModel>,
        controller: &Arc<NavigationController>,
        gate: Arc<PreloadGate>,
        renderer: Renderer,
        registry: EventRegistry,
        timing: &TimingConfig,
    ) -> Result<Workers> {
        let preload = {
            let splash = Splash::new(toolkit.as_ref(), screens.entry);
            let toolkit = toolkit.clone();
            let controller = controller.clone();
            let (steps, step) = (timing.preload_steps, timing.preload_step);
            PreloadWorker::spawn(gate, move || {
                splash.run(toolkit.as_ref(), steps, step);
                controller.finish_preload();
            })?
        };

        let simulator = TemperatureSimulator::spawn(model.clone(), timing.simulation_period)?;

        let tick_toolkit = toolkit.clone();
        let task_toolkit = toolkit.clone();
        let pump = UiPump::start(
            timing,
            move |ms| tick_toolkit.tick_inc(ms),
            move || {
                renderer.apply_pending(task_toolkit.as_ref());
                let events = task_toolkit.task_handler();
                registry.dispatch(events);
            },
        )?;

        Ok(Workers {
            preload,
            simulator,
            pump,
        })
    }

    /// Stop all threads and delete the screens. Idempotent.
    pub fn shutdown(&mut self) {
        let Some(mut workers) = self.workers.take() else {
            return;
        };
        tracing::info!("panel shutting down");
        workers.pump.shutdown();
        workers.simulator.shutdown();
        workers.preload.shutdown();
        self.screens.destroy(self.toolkit.as_ref());
        tracing::info!("panel stopped");
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.workers.is_some()
    }

    /// The screen the controller considers current.
    #[inline]
    pub fn current_screen(&self) -> Screen {
        self.controller.current()
    }

    pub fn model(&self) -> &Arc<TemperatureModel> {
        &self.model
    }

    pub fn screens(&self) -> &Arc<ScreenSet> {
        &self.screens
    }

    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::config::{DEFAULT_CURRENT_TEMP, DEFAULT_WARNING_TEMP, MAX_TEMP};
    use crate::toolkit::FramebufferToolkit;

    fn fast() -> TimingConfig {
        TimingConfig {
            tick_period_ms: 1,
            task_period_ms: 2,
            simulation_period: Duration::from_millis(5),
            preload_step: Duration::from_millis(10),
            preload_steps: 2,
        }
    }

    fn wait_until(cond: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    fn panel() -> (Arc<FramebufferToolkit>, Panel) {
        let toolkit = Arc::new(FramebufferToolkit::new(320, 240));
        let dyn_toolkit: Arc<dyn Toolkit> = toolkit.clone();
        let panel = Panel::new(dyn_toolkit, fast()).unwrap();
        (toolkit, panel)
    }

    fn shows(
        toolkit: &FramebufferToolkit,
        panel: &Panel,
        screen: Screen,
    ) -> bool {
        panel.current_screen() == screen && toolkit.active_screen() == panel.screens().root(screen)
    }

    #[test]
    fn test_starts_on_entry_and_renders() {
        let (toolkit, panel) = panel();
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Entry)));
        assert!(wait_until(|| toolkit.frames_rendered() > 0));
        assert!(wait_until(|| toolkit.tick_ms() > 0));
    }

    #[test]
    fn test_click_through_all_screens() {
        let (toolkit, panel) = panel();
        let screens = panel.screens().clone();
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Entry)));

        toolkit.click(screens.entry.start.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Main)));
        assert!(!toolkit.is_hidden(screens.entry.start.unwrap()));

        toolkit.click(screens.main.next.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Chart)));

        toolkit.click(screens.chart.next.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Image)));

        toolkit.click(screens.image.prev.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Chart)));

        toolkit.click(screens.chart.prev.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Main)));

        toolkit.click(screens.main.prev.unwrap());
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Entry)));
    }

    #[test]
    fn test_simulate_checkbox_drives_simulator() {
        let (toolkit, panel) = panel();
        let screens = panel.screens().clone();
        let model = panel.model().clone();
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Entry)));

        // Inactive simulator leaves the default reading alone
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(model.current(), DEFAULT_CURRENT_TEMP);

        toolkit.click(screens.entry.simulate.unwrap());
        assert!(wait_until(|| model.is_simulate_active()));
        assert!(wait_until(|| model.current() >= 3));
        assert!(model.current() <= MAX_TEMP);

        toolkit.click(screens.entry.simulate.unwrap());
        assert!(wait_until(|| !model.is_simulate_active()));
        assert_eq!(panel.current_screen(), Screen::Entry);
    }

    #[test]
    fn test_slider_changes_warning_and_led() {
        let (toolkit, panel) = panel();
        let screens = panel.screens().clone();
        let model = panel.model().clone();
        assert_eq!(model.warning(), DEFAULT_WARNING_TEMP);

        panel.controller().open(Screen::Main);
        assert!(wait_until(|| shows(&toolkit, &panel, Screen::Main)));

        let led = screens.main.led.unwrap();
        assert!(wait_until(|| !toolkit.is_led_on(led)));

        // Warning below the default current raises the alert
        toolkit.slide_to(screens.main.slider.unwrap(), 10);
        assert!(wait_until(|| model.warning() == 10));
        assert!(wait_until(|| toolkit.needle(screens.main.gauge.unwrap(), 1) == Some(10)));
        assert!(model.alert());
        assert!(wait_until(|| toolkit.is_led_on(led)));

        toolkit.slide_to(screens.main.slider.unwrap(), 30);
        assert!(wait_until(|| !toolkit.is_led_on(led)));
        assert_eq!(model.current(), DEFAULT_CURRENT_TEMP);
    }

    #[test]
    fn test_shutdown_stops_everything_and_deletes_screens() {
        let (toolkit, mut panel) = panel();
        assert!(wait_until(|| toolkit.frames_rendered() > 0));
        panel.shutdown();
        assert!(!panel.is_running());
        assert_eq!(toolkit.object_count(), 0);

        let ticks = toolkit.tick_ms();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(toolkit.tick_ms(), ticks);
        panel.shutdown();
    }

    #[test]
    fn test_shutdown_during_preload_completes() {
        let (toolkit, panel) = panel();
        let screens = panel.screens().clone();
        toolkit.click(screens.entry.start.unwrap());
        assert!(wait_until(|| toolkit.is_hidden(screens.entry.start.unwrap())));
        drop(panel);
        assert_eq!(toolkit.object_count(), 0);
    }

    #[test]
    fn test_degraded_toolkit_still_runs() {
        let toolkit = Arc::new(FramebufferToolkit::with_capacity(320, 240, 4));
        let dyn_toolkit: Arc<dyn Toolkit> = toolkit.clone();
        let mut panel = Panel::new(dyn_toolkit, fast()).unwrap();
        assert!(panel.screens().main.root.is_none());

        panel.controller().open(Screen::Main);
        assert!(wait_until(|| panel.current_screen() == Screen::Main));
        panel.model().set_current(99);
        panel.shutdown();
    }
}
