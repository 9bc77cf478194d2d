//! Line-owning spinner for the interactive renderer.
//!
//! The spinner wraps the diagnostics writer. While it runs, a background
//! thread redraws the current terminal line every [`FRAME_PERIOD`]; any other
//! write goes through [`Spinner::write_all`], which erases the animation line
//! under the same lock before emitting the bytes, so a message and a frame
//! never interleave. A frame left on screen after the spinner stopped is
//! erased by the next write as well.
//!
//! Stopping uses two channels: a stop request and a stop acknowledgement.
//! [`Spinner::stop`] returns only once the animation thread has marked
//! itself stopped, after which the caller owns the line again.

use super::gauge::ProgressGauge;
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between two animation frames.
pub const FRAME_PERIOD: Duration = Duration::from_millis(100);

const FRAMES: [&str; 15] = [
    "⠈⠁", "⠈⠑", "⠈⠱", "⠈⡱", "⢀⡱", "⢄⡱", "⢄⡱", "⢆⡱", "⢎⡱", "⢎⡰", "⢎⡠", "⢎⡀", "⢎⠁", "⠎⠁", "⠊⠁",
];

/// Carriage return followed by "erase entire line".
pub const CLEAR_LINE: &str = "\r\x1b[2K";

const AUTOWRAP_OFF: &str = "\x1b[?7l";
const AUTOWRAP_ON: &str = "\x1b[?7h";

struct State {
    writer: Box<dyn Write + Send>,
    running: bool,
    prefix: String,
    suffix: String,
    gauge: Option<Arc<ProgressGauge>>,
    // The current line holds a frame.
    dirty: bool,
    // Toggling autowrap misbehaves on Windows consoles.
    ansi_frames: bool,
}

impl State {
    fn draw_frame(&mut self, frame: &str) {
        let suffix = match &self.gauge {
            Some(gauge) if gauge.is_ready() => gauge.to_string(),
            _ => self.suffix.clone(),
        };
        let line = if self.ansi_frames {
            format!("{AUTOWRAP_OFF}\r{}{frame}{suffix}{AUTOWRAP_ON}", self.prefix)
        } else {
            format!("\r{}{frame}{suffix}", self.prefix)
        };
        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.flush();
        self.dirty = true;
    }
}

struct Control {
    stop: Sender<()>,
    stopped: Receiver<()>,
    handle: JoinHandle<()>,
}

/// Animated status line drawn over a writer.
pub struct Spinner {
    state: Arc<Mutex<State>>,
    // Held for the whole start/stop handshake so the two never overlap.
    control: Mutex<Option<Control>>,
}

impl Spinner {
    /// Wrap `writer`, choosing the frame format for the current platform.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_ansi_frames(writer, !cfg!(windows))
    }

    /// Wrap `writer` with an explicit frame format.
    pub fn with_ansi_frames<W>(writer: W, ansi_frames: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(State {
                writer: Box::new(writer),
                running: false,
                prefix: String::new(),
                suffix: String::new(),
                gauge: None,
                dirty: false,
                ansi_frames,
            })),
            control: Mutex::new(None),
        }
    }

    /// Text drawn before the animation glyph.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.state.lock().prefix = prefix.into();
    }

    /// Text drawn after the animation glyph.
    pub fn set_suffix(&self, suffix: impl Into<String>) {
        self.state.lock().suffix = suffix.into();
    }

    /// While set and ready, the gauge replaces the suffix on every frame.
    pub fn set_progress_gauge(&self, gauge: Option<Arc<ProgressGauge>>) {
        self.state.lock().gauge = gauge;
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Start animating. Does nothing if already running.
    pub fn start(&self) {
        let mut control = self.control.lock();
        {
            let mut state = self.state.lock();
            if state.running {
                return;
            }
            state.running = true;
            if let Some(gauge) = &state.gauge {
                gauge.init_start_time();
            }
        }

        let (stop_tx, stop_rx) = bounded(1);
        let (stopped_tx, stopped_rx) = bounded(1);
        let state = Arc::clone(&self.state);
        let handle = thread::spawn(move || animate(state, stop_rx, stopped_tx));
        *control = Some(Control {
            stop: stop_tx,
            stopped: stopped_rx,
            handle,
        });
        tracing::trace!("spinner started");
    }

    /// Stop animating and wait until the animation thread has let go of the
    /// line. Does nothing if not running.
    pub fn stop(&self) {
        let mut control = self.control.lock();
        let Some(Control {
            stop,
            stopped,
            handle,
        }) = control.take()
        else {
            return;
        };
        let _ = stop.try_send(());
        let _ = stopped.recv();
        let _ = handle.join();
        drop(control);
        tracing::trace!("spinner stopped");
    }

    /// Write `buf` in one piece, erasing the animation line first if the
    /// spinner is running or its last frame is still shown.
    pub fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.running || state.dirty {
            state.writer.write_all(CLEAR_LINE.as_bytes())?;
        }
        state.writer.write_all(buf)?;
        if buf.ends_with(b"\n") {
            state.dirty = false;
        }
        state.writer.flush()
    }

    /// Run `f` while owning the line, after erasing any frame on it.
    ///
    /// For writes to another stream that may share the terminal, such as
    /// results going to stdout.
    pub fn with_line<R>(&self, f: impl FnOnce() -> R) -> io::Result<R> {
        let mut state = self.state.lock();
        if state.running || state.dirty {
            state.writer.write_all(CLEAR_LINE.as_bytes())?;
            state.writer.flush()?;
            state.dirty = false;
        }
        Ok(f())
    }

    /// Erase a frame left on screen by a stopped spinner.
    pub fn clear_line(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        if !state.dirty {
            return Ok(());
        }
        state.writer.write_all(CLEAR_LINE.as_bytes())?;
        state.dirty = false;
        state.writer.flush()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn animate(state: Arc<Mutex<State>>, stop: Receiver<()>, stopped: Sender<()>) {
    let ticker = tick(FRAME_PERIOD);
    for frame in FRAMES.iter().cycle() {
        // A disconnected stop channel means the spinner is gone.
        let stop_requested = select! {
            recv(stop) -> _ => true,
            recv(ticker) -> _ => false,
        };
        if stop_requested {
            break;
        }
        let mut state = state.lock();
        if !stop.is_empty() {
            break;
        }
        state.draw_frame(frame);
    }
    state.lock().running = false;
    let _ = stopped.send(());
}
