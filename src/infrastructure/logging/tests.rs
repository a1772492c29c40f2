//! Structured logger tests

use super::*;
use chrono::TimeZone;
use tempfile::tempdir;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
}

#[test]
fn test_render_without_data() {
    let entry = LogEntry::new(at(2024, 3, 9, 12), LogLevel::Info, "Bot starting up", None);
    assert_eq!(entry.render(), "[2024-03-09T12:30:00.000Z] [INFO] Bot starting up");
}

#[test]
fn test_render_with_pretty_data() {
    let data = serde_json::json!({ "count": 1 });
    let entry = LogEntry::new(at(2024, 3, 9, 12), LogLevel::Debug, "Research parameters", Some(&data));
    assert_eq!(
        entry.render(),
        "[2024-03-09T12:30:00.000Z] [DEBUG] Research parameters\n{\n  \"count\": 1\n}"
    );
}

#[test]
fn test_auth_is_redacted() {
    let data = serde_json::json!({ "auth": { "username": "u", "password": "p" } });
    let entry = LogEntry::new(at(2024, 3, 9, 12), LogLevel::Error, "oops", Some(&data));
    let line = entry.render();

    let block: Value = serde_json::from_str(line.split_once('\n').unwrap().1).unwrap();
    assert_eq!(
        block,
        serde_json::json!({ "auth": { "username": "***", "password": "***" } })
    );
    assert_eq!(
        serde_json::to_string(entry.data.as_ref().unwrap()).unwrap(),
        r#"{"auth":{"username":"***","password":"***"}}"#
    );
}

#[test]
fn test_redact_leaves_input_untouched() {
    let data = serde_json::json!({ "auth": "secret", "other": 1 });
    let safe = redact(&data);
    assert_eq!(data["auth"], "secret");
    assert_eq!(safe["other"], 1);
    assert_eq!(safe["auth"]["password"], "***");
}

#[test]
fn test_redact_only_top_level() {
    let data = serde_json::json!({ "nested": { "auth": "kept" } });
    assert_eq!(redact(&data), data);
}

#[test]
fn test_unknown_level_is_accepted() {
    let level = LogLevel::from("trace");
    assert_eq!(level, LogLevel::Other("trace".to_string()));
    assert_eq!(level.color(), "");
    let entry = LogEntry::new(at(2024, 1, 1, 0), level, "x", None);
    assert!(entry.render().contains("[TRACE] x"));
}

#[test]
fn test_file_per_utc_day() {
    let dir = tempdir().unwrap();
    let logger = StructuredLogger::new(dir.path().join("logs"), false);

    logger.log_at(at(2024, 3, 9, 23), LogLevel::Info, "late", None);
    logger.log_at(at(2024, 3, 10, 0), LogLevel::Warn, "early", None);
    logger.log_at(at(2024, 3, 10, 1), LogLevel::Info, "again", None);

    let day1 = fs::read_to_string(dir.path().join("logs/2024-03-09.log")).unwrap();
    let day2 = fs::read_to_string(dir.path().join("logs/2024-03-10.log")).unwrap();
    assert_eq!(day1.lines().count(), 1);
    assert!(day1.contains("[INFO] late"));
    assert_eq!(day2.lines().count(), 2);
    assert!(day2.ends_with("[INFO] again\n"));
}

#[test]
fn test_credentials_never_reach_file() {
    let dir = tempdir().unwrap();
    let logger = StructuredLogger::new(dir.path(), false);
    let data = serde_json::json!({ "auth": { "username": "relay-user", "password": "hunter2" } });

    let line = logger.log_at(at(2024, 5, 1, 8), LogLevel::Error, "failed", Some(&data));

    let file = fs::read_to_string(dir.path().join("2024-05-01.log")).unwrap();
    for text in [line.as_str(), file.as_str()] {
        assert!(!text.contains("relay-user"));
        assert!(!text.contains("hunter2"));
    }
}

#[test]
fn test_unwritable_directory_degrades_to_console() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let logger = StructuredLogger::new(&blocker, false);
    assert!(!logger.file_logging());

    let line = logger.info("still works");
    assert!(line.ends_with("[INFO] still works"));
}

#[test]
fn test_append_failure_disables_file_logging() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    let logger = StructuredLogger::new(&logs, false);
    assert!(logger.file_logging());

    fs::remove_dir_all(&logs).unwrap();
    fs::write(&logs, "now a file").unwrap();

    logger.info("first");
    assert!(!logger.file_logging());
    logger.info("second");
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
    }
}

#[test]
fn test_closed_console_still_writes_file() {
    let dir = tempdir().unwrap();
    let logger = StructuredLogger::new(dir.path(), true);
    let now = at(2024, 3, 9, 12);

    let line = logger.log_to(&mut ClosedPipe, now, LogLevel::Error, "Uncaught Exception", None);
    assert!(line.ends_with("[ERROR] Uncaught Exception"));

    let text = fs::read_to_string(dir.path().join("2024-03-09.log")).unwrap();
    assert!(text.contains("[ERROR] Uncaught Exception"));
    assert!(logger.file_logging());
}
