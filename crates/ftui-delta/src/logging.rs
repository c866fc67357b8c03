#![forbid(unsafe_code)]

//! Structured logging for plan construction.
//!
//! With the `tracing` feature the planner's macros are the real `tracing`
//! ones. Without it they expand to nothing, so the planner stays free of any
//! logging dependency while call sites keep a single spelling
//! (`crate::debug!`, `crate::trace!`, ...).
//!
//! # Emitted data
//!
//! | Kind  | Name / level       | Fields                    |
//! |-------|--------------------|---------------------------|
//! | span  | `delta.plan`       | `len`, `policy`           |
//! | event | trace              | `step`, `start`, `end`    |
//! | event | debug              | `steps`                   |
//! | event | warn               | `step`, `options`/`limit` |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Evaluates to a [`NoopSpan`](crate::logging::NoopSpan) when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
