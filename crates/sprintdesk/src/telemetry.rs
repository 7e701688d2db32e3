//! Logging setup.
//!
//! Every crate logs through `tracing`. Applications call [`init`] once at
//! startup to print those events; tests and embedders that install their
//! own subscriber skip it.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_second_returns_false() {
        init("sprintdesk=debug");
        assert!(!init("sprintdesk=debug"));
    }
}
