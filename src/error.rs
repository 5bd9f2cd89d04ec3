//! The crate-wide error and result types.
use crate::{ClientId, MonitorId};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while driving the window manager.
///
/// Fatal variants (connection / startup failures) are expected to terminate the
/// process with a non-zero exit code (see [crate::bootstrap]); the remaining
/// variants are recovered locally by the caller and never unwind out of the
/// event loop (see spec §7).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Could not establish a connection to the display server.
    #[error("unable to open a connection to the display server")]
    ConnectionFailed,

    /// `SubstructureRedirect` was already held by another process.
    #[error("another window manager is already running")]
    AnotherWmRunning,

    /// The configured font could not be loaded.
    #[error("failed to load the configured font")]
    FontLoadFailed,

    /// One or more configured colors could not be allocated.
    #[error("failed to allocate one or more configured colors")]
    ColorAllocFailed,

    /// A tag count was configured that does not fit in the bit budget.
    #[error("tag count {0} exceeds the maximum of {1}")]
    TooManyTags(usize, usize),

    /// There are no monitors attached (should never happen after bootstrap).
    #[error("no monitors are attached")]
    NoMonitors,

    /// Referenced a client that is not present in the arena.
    #[error("{0:?} is not a known client")]
    UnknownClient(ClientId),

    /// Referenced a monitor that is not present in the arena.
    #[error("{0:?} is not a known monitor")]
    UnknownMonitor(MonitorId),

    /// A routine, recoverable failure reported by the [DisplayBackend][crate::backend::DisplayBackend].
    ///
    /// Transient backend errors (bad-window races, stale drawables, grab
    /// contention) are represented this way rather than as dedicated
    /// variants: the core treats them uniformly by logging and continuing.
    #[error("display backend error: {0}")]
    Backend(String),
}
