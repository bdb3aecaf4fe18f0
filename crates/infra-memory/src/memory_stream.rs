// In-memory FIFO byte stream
use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Growable FIFO buffer: writes append, reads consume from the front
///
/// Never blocks; reading an empty buffer returns `Ok(0)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    buf: VecDeque<u8>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream pre-loaded with `data` (e.g. canned input)
    pub fn with_contents(data: impl AsRef<[u8]>) -> Self {
        Self {
            buf: data.as_ref().iter().copied().collect(),
        }
    }

    /// Bytes buffered and not yet read
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Read for MemoryStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        // VecDeque's Read impl drains from the front
        self.buf.read(out)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
