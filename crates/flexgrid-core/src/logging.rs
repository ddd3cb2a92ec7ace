#![forbid(unsafe_code)]

//! Logging shim.
//!
//! The solver and the parsers log through `debug!`, `trace!` and
//! `debug_span!`. With the `tracing` feature these are the `tracing` macros;
//! without it they expand to nothing (spans to [`NoopSpan`]), so call sites
//! look the same either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards its arguments.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when logging is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    /// By-value entry, as `tracing::Span::entered`.
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Returned by [`NoopSpan::enter`]; dropping it does nothing.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
