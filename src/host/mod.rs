//! Hosts that put switches on screen (or on stdout) and feed them input.
//!
//! When the `demo-gtk` feature is enabled, [`gtk::run_main_loop`] takes over
//! the main thread, draws every configured switch with cairo and maps
//! pointer drags onto [`TouchEvent`](crate::gesture::TouchEvent)s.  The
//! [`headless`] host needs no display: it reads events as JSON lines and
//! logs what each switch would draw.

pub mod headless;

#[cfg(feature = "demo-gtk")]
pub mod gtk;

/// Errors produced by a host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no switch at index {index} ({count} configured)")]
    NoSuchSwitch { index: usize, count: usize },
    #[error("failed to initialise display: {0}")]
    Init(String),
}
