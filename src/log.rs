use std::io::Write;

use env_logger::{Builder, Env, Target};

/// Install the stderr logger. `RUST_LOG` wins over `verbose`.
///
/// Stdout carries the generated command, so records never go there.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    // A second call from tests or embedders is harmless.
    let _ = builder.try_init();
}
