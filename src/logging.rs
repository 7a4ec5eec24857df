//! Tracing setup for host shells and tests.
//!
//! The library only emits events; installing a subscriber is the host's
//! call.

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`, with `warn` as
/// the baseline level.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
