//! Tests for `src/logging.rs`.

use springseq::logging::{LoggingGuard, LOG_FILE_NAME};

#[test]
fn logging_guard_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<LoggingGuard>();
}

#[test]
fn log_file_is_named_after_the_crate() {
    assert_eq!(LOG_FILE_NAME, "springseq.log");
}

#[test]
fn init_production_creates_logs_dir() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let logs_dir = tmp.path().join("logs");
    assert!(!logs_dir.exists());

    // The global subscriber can only be installed once per process; the
    // directory is created either way.
    let _result = springseq::logging::init_production(&logs_dir);
    assert!(logs_dir.exists(), "logs directory should be created");
}

#[test]
fn init_cli_twice_does_not_panic() {
    springseq::logging::init_cli();
    springseq::logging::init_cli();
}
