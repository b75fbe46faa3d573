//! Test logging bootstrap for checkers test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Directive used when neither `TEST_LOG` nor `RUST_LOG` is set.
///
/// Keeps the suite quiet apart from warnings and errors.
pub const DEFAULT_DIRECTIVE: &str = "warn";

fn filter() -> EnvFilter {
    match std::env::var("TEST_LOG").or_else(|_| std::env::var("RUST_LOG")) {
        Ok(directive) => EnvFilter::new(directive),
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

/// Install the test subscriber once per process.
///
/// Safe to call from every test and from `#[ctor]` hooks; only the first
/// call has an effect and a subscriber installed by someone else wins.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let _ = fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .with_target(true)
            .without_time()
            .try_init();
    });
}
