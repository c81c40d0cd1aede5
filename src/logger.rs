//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, printed only under `--verbose`
//! - `StatusBlock` for the outcome of a check (success, warning, error)
//!
//! # Example
//!
//! ```ignore
//! log!("service"; "posting to {}", url);
//! status_success("alpha 0.42, contrast 5.10");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "service" => prefix.bright_blue().bold().to_string(),
        "workflow" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Block (overwritable outcome display)
// ============================================================================

/// Outcome display that overwrites its previous output.
///
/// Each call replaces the block printed by the last one, so repeated checks
/// leave only the latest outcome on screen.
///
/// # Example
///
/// ```ignore
/// let mut status = StatusBlock::new();
/// status.success("alpha 0.42");
/// status.warning("contrast 3.00 is below the target 4.5");
/// status.error("request failed", "server error (502)");
/// ```
pub struct StatusBlock {
    /// Lines of previous output to clear
    last_lines: usize,
}

static STATUS: LazyLock<Mutex<StatusBlock>> = LazyLock::new(|| Mutex::new(StatusBlock::new()));

impl StatusBlock {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    /// ✓ prefix, green.
    pub fn success(&mut self, message: &str) {
        self.display(format!("{}", "✓".green()), message);
    }

    /// ⚠ prefix, yellow.
    pub fn warning(&mut self, message: &str) {
        self.display(format!("{}", "⚠".yellow()), message);
    }

    /// ✗ prefix, red, with optional detail on following lines.
    pub fn error(&mut self, summary: &str, detail: &str) {
        self.display(format!("{}", "✗".red()), &join_detail(summary, detail));
    }

    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        writeln!(stdout, "{symbol} {message}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

fn join_detail(summary: &str, detail: &str) -> String {
    if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    }
}

#[inline]
fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}

/// Global status: success
pub fn status_success(message: &str) {
    STATUS.lock().success(message);
}

/// Global status: warning
pub fn status_warning(message: &str) {
    STATUS.lock().warning(message);
}

/// Global status: error
pub fn status_error(summary: &str, detail: &str) {
    STATUS.lock().error(summary, detail);
}

// ============================================================================
// Tests
// ============================================================================
