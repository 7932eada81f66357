//! Diagnostics for the user programs, routed through the same `sys_write`
//! path as every other console line. Each process installs its own logger
//! in `_start`, so a freshly exec'd image logs from its first instruction
//! on. The level is fixed at build time through the `LOG` environment
//! variable; there is no runtime configuration surface.

use log::{Level, LevelFilter, Metadata, Record};

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "\x1b[{}m[{}] {}\x1b[0m",
                color_code(record.metadata().level()),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

pub fn init() {
    log::set_logger(&StdoutLogger).unwrap();
    log::set_max_level(level_from_build_env());
}

fn level_from_build_env() -> LevelFilter {
    match option_env!("LOG") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        // initproc's lifecycle messages are info-level, so that is the
        // default a booted system shows.
        _ => LevelFilter::Info,
    }
}

fn color_code(level: Level) -> u8 {
    match level {
        Level::Error => 31,
        Level::Warn => 93,
        Level::Info => 34,
        Level::Debug => 32,
        Level::Trace => 90,
    }
}
