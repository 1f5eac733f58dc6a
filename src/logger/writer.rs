//! File logger subscriber
//!
//! Renders published events as `<PREFIX>: <message>` lines, mirrors them to
//! the console, and appends them to a date-partitioned log file, creating
//! the log directory on first write. Write failures are reported to stderr
//! and swallowed; logging never propagates back into request handling.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::events::{EventKind, Subscriber};
use crate::logger::clock::Clock;

pub struct FileLogger {
    log_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl FileLogger {
    pub fn new(log_dir: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Self {
        Self {
            log_dir: log_dir.into(),
            clock,
        }
    }

    /// Log file for the current calendar date: `<dir>/<YYYY>-<MM>-<DD>.log`.
    fn current_file(&self) -> PathBuf {
        let date = self.clock.today();
        self.log_dir.join(format!("{}.log", date.format("%Y-%m-%d")))
    }

    fn append(&self, line: &str) {
        let path = self.current_file();
        if let Err(err) = append_line(&path, line) {
            eprintln!("Failed to write to {}: {err}", path.display());
        }
    }
}

impl Subscriber for FileLogger {
    fn on_event(&self, kind: EventKind, message: &str) {
        let line = format!("{}: {message}", kind.prefix());
        match kind {
            EventKind::Log => println!("{line}"),
            EventKind::Error => eprintln!("{line}"),
        }
        self.append(&line);
    }
}

/// Create the containing directory if needed, then append one line.
///
/// The check-then-create is not atomic; directory creation is idempotent so
/// a race between interleaved appends is harmless.
fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
