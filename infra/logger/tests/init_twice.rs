use kmodel_logger::{LevelFilter, LogFormat, Logger, LoggerError};
use tracing::Level;

#[test]
fn second_init_fails_and_keeps_the_first_filter() {
    let rust_log_set = std::env::var_os("RUST_LOG").is_some_and(|value| !value.is_empty());

    let _logger = Logger::builder()
        .name("integration-init-twice")
        .level(LevelFilter::WARN)
        .directive("kmodel=debug")
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("integration-init-twice-second")
        .level(LevelFilter::TRACE)
        .format(LogFormat::Json)
        .init()
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init, got {err}"
    );

    if rust_log_set {
        return;
    }
    assert!(tracing::enabled!(target: "kmodel", Level::DEBUG));
    assert!(tracing::enabled!(target: "kmodel::registry", Level::DEBUG));
    assert!(!tracing::enabled!(target: "kmodel", Level::TRACE));
    assert!(!tracing::enabled!(target: "other_crate", Level::INFO));
    assert!(tracing::enabled!(target: "other_crate", Level::WARN));

    let err = Logger::builder()
        .name("integration-init-twice-third")
        .directive("kmodel=loud")
        .init()
        .expect_err("invalid directive should be rejected");
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
