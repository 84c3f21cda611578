//! Test harness helpers.

use chronicle_telemetry::{LogConfig, setup_logging};

/// Set up test logging with the given filter.
///
/// Output goes through libtest's capture. Safe to call from every test;
/// only the first call installs a subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use chronicle_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("chronicle_client=debug");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = setup_logging(&LogConfig::for_tests(filter));
}

/// Set up test logging with the default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_setup_is_harmless() {
        setup_test_logging("debug");
        setup_test_logging_default();
        tracing::debug!("still logging");
    }
}
