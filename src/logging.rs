//! Logger setup for the headless runner and tests.
//!
//! Dependencies only report warnings. The simulation's own records show at
//! info level, with hit, surface and hitstop traces added in verbose mode.
use env_logger::{Builder, Env};

/// Filter directives applied when `RUST_LOG` is unset.
///
/// # Examples
/// ```
/// use drill_arena::logging::default_filter;
/// assert_eq!(default_filter(false), "warn,drill_arena=info");
/// assert_eq!(default_filter(true), "warn,drill_arena=debug");
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Installs the global logger with [`default_filter`] unless `RUST_LOG`
/// overrides it.
///
/// Calling it again after a logger is installed does nothing.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis().format_target(verbose);

    // Only fails when a logger is already installed.
    drop(builder.try_init());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
        log::debug!(target: "drill_arena", "still logging");
    }
}
