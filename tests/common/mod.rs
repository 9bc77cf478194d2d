//! Shared helpers for integration tests
#![allow(dead_code)]

use regex::Regex;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

/// In-memory writer whose clones share one buffer, so a test can keep a
/// handle while the output under test owns another.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().clone()).expect("output is UTF-8")
    }

    /// Return the contents and clear the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.inner.lock().unwrap());
        String::from_utf8(bytes).expect("output is UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} ").unwrap())
}

/// Replace the leading `YYYY-MM-DD HH:MM:SS ` of every line with `<timestamp> `.
///
/// Panics if a non-empty line has no timestamp.
pub fn mask_timestamps(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            assert!(
                timestamp_regex().is_match(line),
                "line without timestamp: {line:?}"
            );
            timestamp_regex()
                .replace(line, "<timestamp> ")
                .into_owned()
        })
        .collect()
}

/// What a terminal would finally show on each line: the part after the last
/// carriage return.
pub fn final_lines(text: &str) -> Vec<String> {
    text.trim_end_matches('\n')
        .split('\n')
        .map(|line| line.rsplit('\r').next().unwrap_or_default().to_string())
        .collect()
}

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const DEFAULT_FG: &str = "\x1b[39m";
pub const CLEAR_LINE: &str = "\x1b[2K";
