//! Tracing setup for hosts embedding the panel.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "speechpanel_lib=debug";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_DIRECTIVES`] when unset. Returns `false` if a global
/// subscriber was already installed.
pub fn init_tracing() -> bool {
    init_tracing_with(DEFAULT_DIRECTIVES)
}

pub fn init_tracing_with(default_directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .try_init()
        .is_ok()
}
