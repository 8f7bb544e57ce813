//! Logger setup for the command-line tool.

use log::LevelFilter;

/// Maps the `-v` count onto a default level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs `env_logger` on stderr.
///
/// `RUST_LOG`, when set, replaces the verbosity-derived default.
pub fn init_cli_logging(verbose: u8) {
    let mut builder = env_logger::builder();
    builder
        .filter_level(level_for_verbosity(verbose))
        .format_timestamp(None)
        .parse_default_env();
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}
