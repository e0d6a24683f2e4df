//! Logger setup shared by the binaries.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger.
///
/// `verbose` lowers the default level from info to debug. `RUST_LOG` still
/// overrides either default.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // A logger may already be installed (tests call this repeatedly)
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
        log::info!("logger ready");
    }
}
