//! Output capture for interpreter sessions.
//!
//! The session owns one sink per interpreter; the interpreter holds a clone
//! and writes everything the evaluated code prints (plus its own result
//! renderings) into it. The session reads the accumulated bytes back as the
//! plain-text payload after each execution.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Append-only capture buffer shared between a session and its interpreter.
///
/// Clones share the same underlying buffer. All operations absorb lock
/// poisoning so the sink itself can never panic.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl OutputSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        match self.buf.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns true if the captured bytes end with a newline.
    pub fn ends_with_newline(&self) -> bool {
        self.lock().last() == Some(&b'\n')
    }

    /// The captured bytes as a string, replacing invalid UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Append text without going through `io::Write` (never fails).
    pub fn append(&self, text: &str) {
        self.lock().extend_from_slice(text.as_bytes());
    }
}

impl Write for OutputSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
