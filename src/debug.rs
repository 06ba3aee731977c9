//! Process logger for the `vfd` binary.
//!
//! Writes `[+0000ms] [LEVEL] [target] message` lines to stderr. Debug output
//! is enabled via `--debug` flag or `VFD_DEBUG=1` environment variable;
//! otherwise only warnings and errors are shown.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable enabling debug output.
pub const DEBUG_ENV: &str = "VFD_DEBUG";

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOGGER: StderrLogger = StderrLogger;
static START: OnceLock<Instant> = OnceLock::new();

fn color_code(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m", // Gray
        Level::Debug => "\x1b[36m", // Cyan
        Level::Info => "\x1b[32m",  // Green
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Error => "\x1b[31m", // Red
    }
}

/// Formats one log line without the trailing newline.
fn format_line(elapsed_ms: u128, level: Level, target: &str, message: &str, color: bool) -> String {
    let (start, reset) = if color {
        (color_code(level), "\x1b[0m")
    } else {
        ("", "")
    };
    format!("[+{elapsed_ms:04}ms] {start}[{:5}]{reset} [{target}] {message}", level.as_str())
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn || is_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = START.get_or_init(Instant::now).elapsed().as_millis();
        let line = format_line(
            elapsed,
            record.level(),
            record.target(),
            &record.args().to_string(),
            true,
        );
        let _ = writeln!(io::stderr(), "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Returns true if debug output is enabled.
#[inline]
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Returns true if `VFD_DEBUG` asks for debug output.
pub fn requested_by_env() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Installs the logger, with debug output if `debug` is set.
///
/// Calling it again only changes the debug flag.
pub fn init(debug: bool) {
    START.get_or_init(Instant::now);
    DEBUG_ENABLED.store(debug, Ordering::SeqCst);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    log::debug!("debug output enabled");
}
