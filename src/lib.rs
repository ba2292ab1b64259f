//! Threaded temperature-monitoring panel.
//!
//! A small demo panel (320x240) showing a simulated temperature on four
//! screens. The interesting part is the runtime around the GUI toolkit:
//!
//! - [`pump`]: tick and task pump threads driving the toolkit
//! - [`preload`]: condvar gate and the worker running the preload splash
//! - [`simulation`]: background triangular-wave temperature generator
//! - [`temperature`]: shared current/warning model with derived alert
//! - [`navigation`]: screen state machine
//! - [`events`]: widget handle to controller registry
//! - [`render`]: command queue applied to widgets on the task pump
//! - [`app`]: [`Panel`], construction and teardown ordering
//!
//! Supporting modules:
//!
//! - [`toolkit`]: toolkit trait and the framebuffer implementation
//! - [`screens`]: per-screen widget construction and the transition table
//! - [`colors`], [`styles`]: RGB565 colors and widget styles
//! - [`config`]: constants and [`TimingConfig`]
//! - [`error`]: [`PanelError`]
//!
//! # Threads
//!
//! ```text
//!  main ──pointer──▶ toolkit ◀──tick_inc── tick pump (5 ms)
//!                      ▲
//!                      │ render queue, task_handler, dispatch
//!                  task pump (10 ms) ──▶ NavigationController
//!                      ▲                    │          │
//!                      │ readings           ▼          ▼
//!              TemperatureModel ◀── simulator    PreloadGate ──▶ preload worker
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_arguments)] // Drawing functions take geometry plus style
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod colors;
pub mod config;
pub mod error;
pub mod events;
pub mod navigation;
pub mod preload;
pub mod pump;
pub mod render;
pub mod screens;
pub mod simulation;
pub mod styles;
pub mod temperature;
pub mod toolkit;

// Re-export commonly used items
pub use app::Panel;
pub use config::TimingConfig;
pub use error::{PanelError, Result};
pub use screens::Screen;
pub use toolkit::{FramebufferToolkit, Toolkit};
