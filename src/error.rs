//! Error types for the panel runtime.
//!
//! Almost nothing in the panel can fail: temperatures are clamped and missing
//! widgets degrade to no-ops. The one hard failure is the OS refusing to start
//! a worker thread while the panel is being assembled.

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to spawn {thread} thread: {source}")]
    Spawn {
        thread: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl PanelError {
    /// Name of the thread involved, for log fields.
    #[must_use]
    pub const fn thread(&self) -> &'static str {
        match self {
            Self::Spawn { thread, .. } => thread,
        }
    }
}

/// Spawn a named thread, mapping the OS error into [`PanelError::Spawn`].
pub(crate) fn spawn_named<F>(
    name: &'static str,
    body: F,
) -> Result<std::thread::JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(body)
        .map_err(|source| PanelError::Spawn { thread: name, source })
}

/// Join a worker, logging instead of propagating a panic.
pub(crate) fn join_logged(
    name: &'static str,
    handle: std::thread::JoinHandle<()>,
) {
    if handle.join().is_err() {
        tracing::error!(thread = name, "worker thread panicked");
    } else {
        tracing::debug!(thread = name, "worker thread joined");
    }
}
