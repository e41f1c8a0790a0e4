//! Serial log sink for the brain.

use core::time::Duration;

use log::{max_level, set_logger, set_max_level, Level, LevelFilter, Log, Metadata, Record};
use vexide::io::println;

pub static LOGGER: SerialLogger = SerialLogger;

/// Prints records over the serial link as `mm:ss.mmm LEVEL target: message`,
/// coloured by level.
pub struct SerialLogger;

impl SerialLogger {
    pub fn init(&'static self, level: LevelFilter) -> Result<(), log::SetLoggerError> {
        set_logger(self)?;
        set_max_level(level);
        Ok(())
    }
}

fn colour(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1B[31m",
        Level::Warn => "\x1B[33m",
        Level::Info => "\x1B[34m",
        Level::Debug => "\x1B[36m",
        Level::Trace => "\x1B[37m",
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // SAFETY: reads a free-running hardware counter.
        let uptime = Duration::from_micros(unsafe { vex_sdk::vexSystemHighResTimeGet() });
        println!(
            "{:02}:{:02}.{:03} {}{:<5}\x1B[0m {}: {}",
            uptime.as_secs() / 60,
            uptime.as_secs() % 60,
            uptime.subsec_millis(),
            colour(record.level()),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
