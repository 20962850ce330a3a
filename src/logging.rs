//! Process-wide logger set-up.
use bevy_ecs::error::{BevyError, ErrorContext};
use env_logger::{Builder, Env};
use log::{error, LevelFilter};

/// Installs `env_logger` as the `log` backend for the driving demo.
///
/// At the default `info` level only vehicle spawning and system faults are
/// printed. `verbose` switches to `debug`, adding each camera switch and the
/// scene file being loaded. `RUST_LOG` overrides both. Lines carry
/// millisecond timestamps so toggles can be matched to frames.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // A second call finds the logger already set; keep the first one.
    let _ = builder.try_init();
}

/// Bevy error handler that reports failed systems through `log`.
///
/// Install it with `App::set_error_handler` to keep the app running when a
/// follower or vehicle is misconfigured; the fault is logged every tick
/// instead of panicking.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy error handlers receive the error by value."
)]
pub fn log_system_error(err: BevyError, ctx: ErrorContext) {
    error!("{ctx}: {err}");
}
