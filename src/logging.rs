use env_logger::Env;

/// Diagnostics go to stderr, filtered with `RUST_LOG` (default `warn`).
/// `RUST_LOG=debug` prints every convert command before it runs.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
