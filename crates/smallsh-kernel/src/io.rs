//! Stream handles carried by the [`Context`](crate::Context).
//!
//! Commands never touch the process's stdout/stderr directly. They write
//! through an [`OutputSink`] taken from the context, so a test (or a
//! future redirection feature) can swap the sink for a [`CaptureBuffer`].

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex as AsyncMutex;

/// A cloneable, shared handle to a byte sink.
///
/// Clones point at the same underlying writer; writes are serialized.
#[derive(Clone)]
pub struct OutputSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink {
    /// Wrap an arbitrary writer.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// The process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// The process's standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// A sink that records everything written to it.
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Self::new(buffer.clone()), buffer)
    }

    /// True if both handles share the same underlying writer.
    pub fn same_as(&self, other: &OutputSink) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn with_writer<T>(&self, f: impl FnOnce(&mut dyn Write) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("output sink lock poisoned"))?;
        f(guard.as_mut())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_writer(|w| w.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.with_writer(|w| w.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_writer(|w| w.flush())
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("id", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

/// In-memory writer returned by [`OutputSink::capture`].
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        match self.bytes.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// Drain and return the buffered output.
    pub fn take(&self) -> String {
        let drained = match self.bytes.lock() {
            Ok(mut bytes) => std::mem::take(&mut *bytes),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        String::from_utf8_lossy(&drained).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("capture buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Outcome of waiting for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A complete line, newline stripped.
    Line(String),
    /// The stream ended. Carries any unterminated trailing text, which is
    /// not treated as a line.
    Eof { partial: String },
}

/// A cloneable, shared handle to a line-oriented input stream.
#[derive(Clone)]
pub struct InputSource {
    inner: Arc<AsyncMutex<Box<dyn AsyncBufRead + Send + Unpin>>>,
}

impl InputSource {
    /// Wrap a buffered async reader.
    pub fn new(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        Self {
            inner: Arc::new(AsyncMutex::new(Box::new(reader))),
        }
    }

    /// The process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }

    /// An input source that yields the given text and then ends.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(io::Cursor::new(text.into().into_bytes()))
    }

    /// True if both handles share the same underlying reader.
    pub fn same_as(&self, other: &InputSource) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Wait for the next newline-terminated line.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD; only a
    /// failing reader is an error.
    pub async fn read_line(&self) -> io::Result<LineRead> {
        let mut reader = self.inner.lock().await;
        let mut buf = Vec::new();
        reader.read_until(b'\n', &mut buf).await?;

        match buf.strip_suffix(b"\n") {
            Some(line) => {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                Ok(LineRead::Line(String::from_utf8_lossy(line).into_owned()))
            }
            None => Ok(LineRead::Eof {
                partial: String::from_utf8_lossy(&buf).into_owned(),
            }),
        }
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSource")
            .field("id", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
