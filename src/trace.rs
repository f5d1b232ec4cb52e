//! Tracing infrastructure for inspecting descent trajectories.
//!
//! When the `trace` feature is enabled, key descent events are written to a
//! `TraceWriter`, allowing line-by-line inspection of an optimization run
//! (which candidate won each iteration, how many evaluations were cached,
//! where convergence was detected).
//!
//! The trace output format is a series of tagged lines:
//! ```text
//! TRACE START dim=<d> search_range=<k> lattice=<n>
//! TRACE ITER t=<n> best=<idx> f=<val> nfev=<n> hits=<n>
//! TRACE CONVERGED t=<n> f=<val> nfev=<n>
//! ```

use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::sync::Mutex;

/// A thread-safe buffer that collects trace lines.
pub struct TraceWriter {
    buffer: Mutex<String>,
}

impl TraceWriter {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(String::with_capacity(16 * 1024)),
        }
    }

    /// Write a formatted trace line.
    pub fn write_line(&self, line: &str) {
        let mut buf = self.buffer.lock().unwrap();
        buf.push_str(line);
        buf.push('\n');
    }

    /// Write a formatted trace line using format args.
    pub fn write_fmt(&self, args: std::fmt::Arguments<'_>) {
        let mut buf = self.buffer.lock().unwrap();
        let _ = buf.write_fmt(args);
        buf.push('\n');
    }

    /// Get all collected trace output.
    pub fn get_output(&self) -> String {
        self.buffer.lock().unwrap().clone()
    }

    /// Get trace output as a vector of lines.
    pub fn get_lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .unwrap()
            .lines()
            .map(|s| s.to_string())
            .collect()
    }

    /// Also write trace output to stderr for debugging.
    pub fn dump_to_stderr(&self) {
        let buf = self.buffer.lock().unwrap();
        let _ = std::io::stderr().write_all(buf.as_bytes());
    }
}

impl Default for TraceWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Macro for conditional trace output (only active with `trace` feature).
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_write {
    ($tracer:expr, $($arg:tt)*) => {
        if let Some(tw) = $tracer {
            tw.write_fmt(format_args!($($arg)*));
        }
    };
}

/// No-op when trace feature is disabled.
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_write {
    ($tracer:expr, $($arg:tt)*) => {};
}
