#![forbid(unsafe_code)]

//! Delta: non-overshooting transition plans for numeric sequences.
//!
//! # Role in FrankenTUI
//! `ftui-delta` decides *how* a row of numbers moves from the values on
//! screen to new values, so counters, gauges, and tables can animate without
//! any cell passing its destination and snapping back. It computes plans;
//! rendering and timing stay with the caller.
//!
//! # Pipeline
//! 1. **Gaps** ([`gaps`]): `target[i] - current[i]` per position.
//! 2. **Runs** ([`find_runs`]): maximal same-signed spans of non-zero gaps,
//!    each with the closest-to-zero gap as its safe delta.
//! 3. **Selection** ([`SelectionPolicy`]): caller-supplied choice of run.
//! 4. **Apply** ([`apply`]): new snapshot with one run shifted.
//! 5. **Plan** ([`Planner::build`]): repeat until no runs remain.
//!
//! ```
//! use ftui_delta::{First, RunDelta, build_plan};
//!
//! let plan = build_plan(&[32, 152, 68, 8], &[3, 12, 32, 15], &First).unwrap();
//! assert_eq!(plan.steps()[0].run, RunDelta::new(0..3, -29));
//! assert_eq!(plan.final_snapshot(), &[3, 12, 32, 15]);
//! ```
//!
//! # Feature flags
//! - `tracing`: emit spans and events through `tracing`.
//! - `serde`: derive `Serialize`/`Deserialize` on runs, plans, and config.
//! - `config`: load [`DeltaConfig`] from TOML or JSON.

pub mod apply;
pub mod config;
pub mod error;
pub mod gap;
pub mod logging;
pub mod numeric;
pub mod plan;
pub mod playback;
pub mod policy;
pub mod runs;

pub use apply::apply;
pub use config::DeltaConfig;
#[cfg(feature = "config")]
pub use config::DeltaConfigError;
pub use error::{DeltaError, ErrorKind, Result};
pub use gap::gaps;
pub use numeric::{DEFAULT_EPSILON, Numeric, NumericKind, Tolerance};
pub use plan::{Plan, PlanStep, Planner, build_plan};
pub use playback::PlanCursor;
pub use policy::{
    First, Last, LargestMagnitude, PolicyKind, SelectionPolicy, SmallestMagnitude, UnknownPolicy,
    Widest,
};
pub use runs::{RunDelta, find_runs, find_runs_with};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
