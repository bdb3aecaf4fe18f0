// Null Device - one inert backend for every capability port
//
// Used for benchmarking command paths without paying for I/O or storage.

use std::io::{self, Read, Write};

use crate::error::FsResult;
use crate::port::{File, FileInfo, FileMode, Filesystem, OpenFlags, WritableFile};

/// Discards all writes and answers every read with nothing
///
/// - Stream read: `Ok(0)`. Rust's `Read` treats that as end of stream, so
///   `read_to_end` terminates; a loop that keeps reading after `Ok(0)` spins.
/// - Stream write: accepts and drops every byte.
/// - Filesystem lookups: `Ok(None)`, indistinguishable from "nothing there".
/// - Filesystem mutations: `Ok(())`, no effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullDevice;

impl Read for NullDevice {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Write for NullDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Filesystem for NullDevice {
    fn open(&self, _path: &str) -> FsResult<Option<Box<dyn File>>> {
        Ok(None)
    }

    fn read_dir(&self, _path: &str) -> FsResult<Option<Vec<FileInfo>>> {
        Ok(None)
    }

    fn read_file(&self, _path: &str) -> FsResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn stat(&self, _path: &str) -> FsResult<Option<FileInfo>> {
        Ok(None)
    }

    fn open_for_write(
        &mut self,
        _path: &str,
        _flags: OpenFlags,
        _mode: FileMode,
    ) -> FsResult<Option<Box<dyn WritableFile>>> {
        Ok(None)
    }

    fn remove(&mut self, _path: &str) -> FsResult<()> {
        Ok(())
    }

    fn write_file(&mut self, _path: &str, _data: &[u8], _mode: FileMode) -> FsResult<()> {
        Ok(())
    }
}
