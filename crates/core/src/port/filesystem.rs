// Filesystem Port - the operation set an Environment may use on its filesystem

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{FsError, FsResult};

/// Unix permission bits for created files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMode(pub u32);

impl FileMode {
    pub const DEFAULT_FILE: FileMode = FileMode(0o644);
    pub const DEFAULT_DIR: FileMode = FileMode(0o755);

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        FileMode::DEFAULT_FILE
    }
}

/// Flags for `Filesystem::open_for_write`
///
/// Handles opened this way are always writable. `append` and `truncate`
/// are mutually exclusive; backends reject the pair with
/// `FsError::InvalidFlags`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenFlags {
    /// Every write goes to the end of the file
    pub append: bool,
    /// Create the file if it does not exist
    pub create: bool,
    /// Truncate an existing file to zero length
    pub truncate: bool,
    /// Fail if the file already exists (only meaningful with `create`)
    pub exclusive: bool,
}

impl OpenFlags {
    /// Create or truncate, like `File::create`
    pub const CREATE_TRUNCATE: OpenFlags = OpenFlags {
        append: false,
        create: true,
        truncate: true,
        exclusive: false,
    };

    /// Create if missing and append
    pub const CREATE_APPEND: OpenFlags = OpenFlags {
        append: true,
        create: true,
        truncate: false,
        exclusive: false,
    };

    /// Create a new file, failing if one exists
    pub const CREATE_NEW: OpenFlags = OpenFlags {
        append: false,
        create: true,
        truncate: false,
        exclusive: true,
    };

    /// Reject flag combinations no backend can honour
    pub fn check(&self, path: &str) -> FsResult<()> {
        if self.append && self.truncate {
            return Err(FsError::InvalidFlags {
                path: path.to_string(),
                reason: "append and truncate are mutually exclusive",
            });
        }
        Ok(())
    }
}

/// Metadata describing a file or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Base name (last path component)
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
    pub mode: FileMode,
    pub modified: Option<DateTime<Utc>>, // None if the backend does not track it
}

/// Readable file handle
pub trait File: Read + Send {
    fn stat(&self) -> FsResult<FileInfo>;
}

/// File handle opened for writing
pub trait WritableFile: File + Write {}

impl<T: File + Write> WritableFile for T {}

/// Filesystem capability
///
/// Lookups return `Ok(Some(..))` on success and an error for missing paths.
/// An inert backend may answer `Ok(None)` ("absent, no error"); callers that
/// need the value must treat `None` as "nothing there".
///
/// Implementations:
/// - OsFilesystem: real OS filesystem (infra-system)
/// - MemoryFilesystem: isolated in-memory tree (infra-memory)
/// - NullDevice: answers everything with nothing
pub trait Filesystem: Send {
    /// Open a file for reading
    fn open(&self, path: &str) -> FsResult<Option<Box<dyn File>>>;

    /// List a directory, sorted by name
    fn read_dir(&self, path: &str) -> FsResult<Option<Vec<FileInfo>>>;

    /// Read a whole file
    fn read_file(&self, path: &str) -> FsResult<Option<Vec<u8>>>;

    /// Describe a file or directory
    fn stat(&self, path: &str) -> FsResult<Option<FileInfo>>;

    /// Open a file for writing
    ///
    /// # Errors
    /// - FsError::NotFound if the file is missing and `flags.create` is unset
    /// - FsError::AlreadyExists if `flags.exclusive` is set and the file exists
    fn open_for_write(
        &mut self,
        path: &str,
        flags: OpenFlags,
        mode: FileMode,
    ) -> FsResult<Option<Box<dyn WritableFile>>>;

    /// Remove a file or an empty directory
    fn remove(&mut self, path: &str) -> FsResult<()>;

    /// Create or replace a file with `data`
    fn write_file(&mut self, path: &str, data: &[u8], mode: FileMode) -> FsResult<()>;
}
