use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use time::format_description::OwnedFormatItem;
use time::OffsetDateTime;

/// Logger writing every record to a per-session file, one line each:
/// `2026-08-25 18:04:11 | DEBUG | target | message`.
pub struct FileLogger {
    file: Mutex<File>,
    stamp_format: OwnedFormatItem,
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

impl FileLogger {
    /// Install the logger, writing to `<log_dir>/blackjack_YYYYMMDD_HHMMSS.log`.
    /// Returns the path of the created file.
    pub fn init(log_dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(log_dir)?;

        let file_stamp = time::format_description::parse_owned::<2>(
            "[year][month][day]_[hour][minute][second]",
        )
        .expect("static format string");
        let stamp_format = time::format_description::parse_owned::<2>(
            "[year]-[month]-[day] [hour]:[minute]:[second]",
        )
        .expect("static format string");

        let stamp = now()
            .format(&file_stamp)
            .unwrap_or_else(|_| "session".to_string());
        let path = log_dir.join(format!("blackjack_{stamp}.log"));
        let file = File::create(&path)?;

        let logger = FileLogger {
            file: Mutex::new(file),
            stamp_format,
        };
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(LevelFilter::Debug);
        }
        Ok(path)
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let stamp = now()
            .format(&self.stamp_format)
            .unwrap_or_else(|_| String::new());
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} | {:5} | {:10} | {}",
                stamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
