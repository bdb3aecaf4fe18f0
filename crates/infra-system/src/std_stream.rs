// Standard stream adapter
use std::io::{self, Read, Stderr, Stdin, Stdout, Write};

/// One of the process standard streams, as a bidirectional Stream
///
/// Only the natural direction works: reading stdout/stderr or writing stdin
/// fails with `ErrorKind::Unsupported` (so a drain of stdout is empty).
pub enum StdStream {
    Input(Stdin),
    Output(Stdout),
    Error(Stderr),
}

impl StdStream {
    pub fn stdin() -> Self {
        StdStream::Input(io::stdin())
    }

    pub fn stdout() -> Self {
        StdStream::Output(io::stdout())
    }

    pub fn stderr() -> Self {
        StdStream::Error(io::stderr())
    }

    fn name(&self) -> &'static str {
        match self {
            StdStream::Input(_) => "stdin",
            StdStream::Output(_) => "stdout",
            StdStream::Error(_) => "stderr",
        }
    }

    fn unsupported(&self, op: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("cannot {} {}", op, self.name()),
        )
    }
}

impl Read for StdStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            StdStream::Input(stdin) => stdin.read(buf),
            _ => Err(self.unsupported("read from")),
        }
    }
}

impl Write for StdStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdStream::Output(stdout) => stdout.write(buf),
            StdStream::Error(stderr) => stderr.write(buf),
            StdStream::Input(_) => Err(self.unsupported("write to")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdStream::Output(stdout) => stdout.flush(),
            StdStream::Error(stderr) => stderr.flush(),
            StdStream::Input(_) => Ok(()),
        }
    }
}
