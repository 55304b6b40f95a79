use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

/// A log record kept by the capturing logger
#[derive(Clone, Debug)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// A `log` backend that keeps every record in memory.
/// Tests run in parallel and share it, so filter by something unique to the test.
pub struct CapturingLogger {
    records: Mutex<Vec<CapturedRecord>>,
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

static INIT: Once = Once::new();

/// Installs the capturing logger (once per process) and returns it.
///
/// # Panics
/// Panics if a different logger was installed first
pub fn capture_logs() -> &'static CapturingLogger {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("Another logger is already installed");
        log::set_max_level(LevelFilter::Trace);
    });
    &LOGGER
}

impl CapturingLogger {
    /// Records at `level` whose message contains `needle`
    pub fn records_containing(&self, level: Level, needle: &str) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.level == level && record.message.contains(needle))
            .cloned()
            .collect()
    }

    /// All records captured so far
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let captured = CapturedRecord {
            level: record.level(),
            target: record.target().to_owned(),
            message: record.args().to_string(),
        };
        // A poisoned lock means another test already panicked
        if let Ok(mut records) = self.records.lock() {
            records.push(captured);
        }
    }

    fn flush(&self) {}
}
