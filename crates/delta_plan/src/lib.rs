#![forbid(unsafe_code)]

//! Command-line front end for `ftui-delta`.
//!
//! `delta_plan plan` prints every step of a non-overshooting transition,
//! `delta_plan runs` prints the current run partition, and
//! `delta_plan policies` lists the built-in selection policies.

pub mod cli;
pub mod error;
pub mod input;
pub mod report;

pub use cli::{Cli, run};
pub use error::{CliError, Result};

use tracing_subscriber::EnvFilter;

/// Install the global log subscriber on stderr.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` picks the level:
/// `0` warn, `1` debug, `2+` trace.
pub fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    // A subscriber installed earlier (tests, embedding) stays in place.
    let _ = result;
}
