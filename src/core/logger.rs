use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use once_cell::sync::Lazy;
use log::{
    LevelFilter,
    Metadata,
    Record
};

static DESK_LOGGER: Lazy<DeskLogger> = Lazy::new(|| DeskLogger {
    console : AtomicBool::new(true),
    file    : Mutex::new(None),
});

struct DeskLogger {
    console : AtomicBool,
    file    : Mutex<Option<File>>,
}

impl log::Log for DeskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        if self.console.load(Ordering::Relaxed) {
            println!("{}", line);
        }

        if let Ok(mut guard) = self.file.lock() {
            if let Some(fp) = guard.as_mut() {
                _ = writeln!(fp, "{}", line);
            }
        }
    }

    fn flush(&self) {
        _ = io::stdout().flush();
        if let Ok(mut guard) = self.file.lock() {
            if let Some(fp) = guard.as_mut() {
                _ = fp.flush();
            }
        }
    }
}

/// Installs the process-wide logger. Records are printed to stdout and,
/// when `file` is given, appended to that file as well.
pub fn setup(level: LevelFilter, file: Option<&str>) {
    let logger: &'static DeskLogger = &DESK_LOGGER;
    logger.console.store(true, Ordering::Relaxed);

    let fp = file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Opening log file {} error: {e}", path))
            .ok()
    });
    if let Ok(mut guard) = logger.file.lock() {
        *guard = fp;
    }

    _ = log::set_logger(logger);
    log::set_max_level(level);
}

/// Stops echoing records to stdout; the log file, if any, keeps receiving them.
pub fn revert_console_output() {
    DESK_LOGGER.console.store(false, Ordering::Relaxed);
}

/// Closes the log file and silences every level. The `log` facade accepts a
/// logger only once per process, so the installed one stays in place and a
/// later `setup` simply re-enables it.
pub fn teardown() {
    if let Ok(mut guard) = DESK_LOGGER.file.lock() {
        *guard = None;
    }
    log::set_max_level(LevelFilter::Off);
}
