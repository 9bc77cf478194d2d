//! Fixed-width progress gauge and elapsed-time formatting.
//!
//! A [`ProgressGauge`] renders as a bar of constant width for a fixed status
//! text, which lets the interactive spinner redraw it in place every tick:
//!
//! ```text
//!  static-status [===>                                1/10] (time elapsed 00s)
//!  static-status [==========>                         3/10] (time elapsed 00s)
//!  static-status [==================================>10/10] (time elapsed 01s)
//! ```
//!
//! The gauge is shared between the caller driving the work and the thread
//! drawing the animation, so counters are atomics and the status sits behind
//! a lock.

use parking_lot::Mutex;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// Total width of the bracketed section, ratio included.
const MAX_PROGRESS_BAR_WIDTH: usize = 40;

/// Counter-driven progress bar with elapsed time.
///
/// Values that do not describe a valid position (`current` outside
/// `0..=capacity`, or `capacity <= 0`) are not errors: the gauge simply
/// renders its status text alone until the values make sense again.
#[derive(Debug, Default)]
pub struct ProgressGauge {
    status: Mutex<String>,
    current: AtomicI64,
    capacity: AtomicI64,
    start_time: OnceLock<Instant>,
}

impl ProgressGauge {
    /// Create an empty gauge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gauge with a status and capacity already set.
    pub fn with_capacity(status: impl Into<String>, capacity: i64) -> Self {
        let gauge = Self::new();
        gauge.set_status(status);
        gauge.set_capacity(capacity);
        gauge
    }

    /// Whether the gauge can render a bar.
    pub fn is_ready(&self) -> bool {
        let current = self.current();
        let capacity = self.capacity();
        current >= 0 && capacity > 0 && current <= capacity && self.start_time.get().is_some()
    }

    /// Set the capacity. Negative values are ignored.
    pub fn set_capacity(&self, capacity: i64) {
        if capacity < 0 {
            return;
        }
        self.capacity.store(capacity, Ordering::Relaxed);
    }

    /// Replace the status text shown before the bar.
    pub fn set_status(&self, status: impl Into<String>) {
        *self.status.lock() = status.into();
    }

    /// Set the current position.
    pub fn set(&self, current: i64) {
        self.current.store(current, Ordering::Relaxed);
    }

    /// Advance by one.
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
    }

    /// Step back by one.
    pub fn dec(&self) {
        self.current.fetch_sub(1, Ordering::Relaxed);
    }

    /// Start the elapsed-time clock if it is not running yet.
    pub fn init_start_time(&self) {
        self.start_time.get_or_init(Instant::now);
    }

    pub fn current(&self) -> i64 {
        self.current.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> i64 {
        self.capacity.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> String {
        self.status.lock().clone()
    }

    /// Time since the clock started, zero if it has not.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .get()
            .map(Instant::elapsed)
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn start_at(&self, start: Instant) {
        let _ = self.start_time.set(start);
    }
}

impl fmt::Display for ProgressGauge {
    /// Renders the bar, or ` <status>` when the values are out of range.
    ///
    /// Rendering starts the elapsed-time clock if needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.init_start_time();
        let status = self.status();
        if !self.is_ready() {
            return write!(f, " {status}");
        }

        let current = self.current();
        let capacity = self.capacity();
        let duration = human_readable_duration(self.elapsed());
        let ratio = format!("{current}/{capacity}");
        let available = MAX_PROGRESS_BAR_WIDTH.saturating_sub(ratio.len());
        let progress = (available as i64 * current / capacity).max(0) as usize;

        let mut bar = String::with_capacity(available);
        if progress > 0 {
            let filled = if progress == available {
                progress - 1
            } else {
                progress
            };
            bar.push_str(&"=".repeat(filled));
            bar.push('>');
        }
        let spaces = available.saturating_sub(bar.chars().count());

        write!(
            f,
            " {status} [{bar}{}{ratio}] (time elapsed {duration}) ",
            " ".repeat(spaces)
        )
    }
}

/// Format a duration as minutes and zero-padded seconds, never hours.
///
/// `00s`, `30s`, `1m00s`, `61m30s`.
pub fn human_readable_duration(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    let seconds = (duration.as_secs_f64() % 60.0) as u64;
    if minutes > 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{seconds:02}s")
    }
}
