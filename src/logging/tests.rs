use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::logging::{LogLevel, LogTarget, Logger};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_logs_dir() -> PathBuf {
    std::env::temp_dir().join(format!(
        "reqlint-logs-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ))
}

#[test]
fn log_levels_display_upper_case() {
    assert_eq!(LogLevel::Info.to_string(), "INFO");
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
    assert_eq!(LogLevel::Error.to_string(), "ERROR");
}

#[test]
fn file_sink_is_created_lazily() {
    let dir = temp_logs_dir();
    let logger = Logger::new();
    logger.set_log_dir(&dir);
    assert!(logger.log_path().is_none(), "no file before first write");

    logger.info("parsed 3 requirements", LogTarget::FileOnly);
    let path = logger.log_path().expect("file sink should exist");
    let contents = fs::read_to_string(&path).expect("log file should read");
    assert!(contents.contains("parsed 3 requirements"));
    assert!(contents.contains("INFO"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn disabled_file_logging_writes_nothing() {
    let dir = temp_logs_dir();
    let logger = Logger::new();
    logger.set_log_dir(&dir);
    logger.set_file_logging_enabled(false);

    logger.warn("should stay off disk", LogTarget::ConsoleAndFile);
    assert!(logger.log_path().is_none());
    assert!(!logger.file_logging_enabled());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn console_only_messages_skip_the_file() {
    let dir = temp_logs_dir();
    let logger = Logger::new();
    logger.set_log_dir(&dir);

    logger.info("console only", LogTarget::ConsoleOnly);
    assert!(logger.log_path().is_none());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn log_dir_is_fixed_after_first_write() {
    let first = temp_logs_dir();
    let second = temp_logs_dir();
    let logger = Logger::new();
    logger.set_log_dir(&first);
    logger.error("boom", LogTarget::FileOnly);

    logger.set_log_dir(&second);
    assert_eq!(logger.log_dir(), Some(first.clone()));

    let _ = fs::remove_dir_all(first);
}

#[test]
fn levels_are_stamped_into_file_lines() {
    let dir = temp_logs_dir();
    let logger = Logger::new();
    logger.set_log_dir(&dir);

    logger.warn("watch out", LogTarget::FileOnly);
    logger.error("broken", LogTarget::FileOnly);

    let contents = fs::read_to_string(logger.log_path().expect("log file")).expect("read");
    assert!(contents.contains("WARN"));
    assert!(contents.contains("ERROR"));

    let _ = fs::remove_dir_all(dir);
}
