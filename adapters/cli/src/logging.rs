use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global logger.
///
/// Verbose runs show debug records; otherwise only info and above are
/// printed. `RUST_LOG` takes precedence over both.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only when a logger is already installed.
    let _ = Builder::from_env(env).format_timestamp(None).try_init();
}
