// In-memory filesystem
// Files live in a shared map keyed by normalized path; directories are implicit.
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

use cmdenv_core::error::{FsError, FsResult};
use cmdenv_core::port::{
    Clock, File, FileInfo, FileMode, Filesystem, OpenFlags, SystemClock, WritableFile,
};

#[derive(Debug, Clone)]
struct Entry {
    data: Vec<u8>,
    mode: FileMode,
    modified: DateTime<Utc>,
}

type Files = BTreeMap<String, Entry>;

/// Isolated in-memory filesystem
///
/// Paths are slash-separated; a leading `/` or `./` is ignored and `..` is
/// rejected. A directory exists while any file lives below it; the root
/// always exists. Every `new()` owns fresh storage, `clone()` shares it.
#[derive(Clone)]
pub struct MemoryFilesystem {
    files: Arc<Mutex<Files>>,
    clock: Arc<dyn Clock>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Use `clock` for modification times
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            files: Arc::new(Mutex::new(Files::new())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Files> {
        lock_files(&self.files)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_nanos(self.clock.now_nanos())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_files(files: &Mutex<Files>) -> MutexGuard<'_, Files> {
    files.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Canonical key for `path`; the root is ""
fn normalize(path: &str) -> FsResult<String> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');
    let mut parts = Vec::new();
    for part in trimmed.split('/') {
        match part {
            "." => continue,
            "" if trimmed.is_empty() => continue,
            "" | ".." => return Err(FsError::InvalidPath(path.to_string())),
            _ => parts.push(part),
        }
    }
    Ok(parts.join("/"))
}

fn base_name(key: &str) -> String {
    match key.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ".".to_string(),
    }
}

fn dir_prefix(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{}/", key)
    }
}

fn is_dir(files: &Files, key: &str) -> bool {
    if key.is_empty() {
        return true;
    }
    let prefix = dir_prefix(key);
    files
        .range(prefix.clone()..)
        .next()
        .map(|(k, _)| k.starts_with(&prefix))
        .unwrap_or(false)
}

fn dir_info(key: &str) -> FileInfo {
    FileInfo {
        name: base_name(key),
        size: 0,
        is_dir: true,
        mode: FileMode::DEFAULT_DIR,
        modified: None,
    }
}

fn file_info(key: &str, entry: &Entry) -> FileInfo {
    FileInfo {
        name: base_name(key),
        size: entry.data.len() as u64,
        is_dir: false,
        mode: entry.mode,
        modified: Some(entry.modified),
    }
}

/// Creating `key` must not pass through an existing file or replace a directory
fn check_creatable(files: &Files, key: &str, path: &str) -> FsResult<()> {
    if key.is_empty() || is_dir(files, key) {
        return Err(FsError::IsADirectory(path.to_string()));
    }
    let mut end = 0;
    while let Some(offset) = key[end..].find('/') {
        end += offset;
        let ancestor = &key[..end];
        if files.contains_key(ancestor) {
            return Err(FsError::NotADirectory(ancestor.to_string()));
        }
        end += 1;
    }
    Ok(())
}

/// Read-only snapshot of a file taken at open time
struct MemoryFile {
    info: FileInfo,
    data: io::Cursor<Vec<u8>>,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl File for MemoryFile {
    fn stat(&self) -> FsResult<FileInfo> {
        Ok(self.info.clone())
    }
}

/// Live handle: writes land in the shared storage immediately
struct MemoryWritableFile {
    files: Arc<Mutex<Files>>,
    clock: Arc<dyn Clock>,
    key: String,
    pos: usize,
    append: bool,
}

impl MemoryWritableFile {
    fn removed(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("file was removed: {}", self.key),
        )
    }
}

impl Read for MemoryWritableFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let files = lock_files(&self.files);
        let entry = files.get(&self.key).ok_or_else(|| self.removed())?;
        let available = entry.data.get(self.pos..).unwrap_or(&[]);
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        drop(files);
        self.pos += n;
        Ok(n)
    }
}

impl Write for MemoryWritableFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let now = Utc.timestamp_nanos(self.clock.now_nanos());
        let mut files = lock_files(&self.files);
        let entry = files.get_mut(&self.key).ok_or_else(|| self.removed())?;

        if self.append {
            self.pos = entry.data.len();
        }
        let end = self.pos + buf.len();
        if entry.data.len() < end {
            entry.data.resize(end, 0);
        }
        entry.data[self.pos..end].copy_from_slice(buf);
        entry.modified = now;
        self.pos = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl File for MemoryWritableFile {
    fn stat(&self) -> FsResult<FileInfo> {
        let files = lock_files(&self.files);
        files
            .get(&self.key)
            .map(|entry| file_info(&self.key, entry))
            .ok_or_else(|| FsError::NotFound(self.key.clone()))
    }
}

impl Filesystem for MemoryFilesystem {
    fn open(&self, path: &str) -> FsResult<Option<Box<dyn File>>> {
        trace!(path = %path, "open");
        let key = normalize(path)?;
        let files = self.lock();
        match files.get(&key) {
            Some(entry) => Ok(Some(Box::new(MemoryFile {
                info: file_info(&key, entry),
                data: io::Cursor::new(entry.data.clone()),
            }))),
            None if is_dir(&files, &key) => Err(FsError::IsADirectory(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    fn read_dir(&self, path: &str) -> FsResult<Option<Vec<FileInfo>>> {
        trace!(path = %path, "read_dir");
        let key = normalize(path)?;
        let files = self.lock();
        if files.contains_key(&key) {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        if !is_dir(&files, &key) {
            return Err(FsError::NotFound(path.to_string()));
        }

        let prefix = dir_prefix(&key);
        let mut children: BTreeMap<String, FileInfo> = BTreeMap::new();
        for (k, entry) in files.range(prefix.clone()..) {
            let Some(rest) = k.strip_prefix(&prefix) else {
                break;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    children
                        .entry(child.to_string())
                        .or_insert_with(|| dir_info(child));
                }
                None => {
                    children.insert(rest.to_string(), file_info(k, entry));
                }
            }
        }
        Ok(Some(children.into_values().collect()))
    }

    fn read_file(&self, path: &str) -> FsResult<Option<Vec<u8>>> {
        trace!(path = %path, "read_file");
        let key = normalize(path)?;
        let files = self.lock();
        match files.get(&key) {
            Some(entry) => Ok(Some(entry.data.clone())),
            None if is_dir(&files, &key) => Err(FsError::IsADirectory(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    fn stat(&self, path: &str) -> FsResult<Option<FileInfo>> {
        trace!(path = %path, "stat");
        let key = normalize(path)?;
        let files = self.lock();
        match files.get(&key) {
            Some(entry) => Ok(Some(file_info(&key, entry))),
            None if is_dir(&files, &key) => Ok(Some(dir_info(&key))),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    fn open_for_write(
        &mut self,
        path: &str,
        flags: OpenFlags,
        mode: FileMode,
    ) -> FsResult<Option<Box<dyn WritableFile>>> {
        trace!(path = %path, ?flags, "open_for_write");
        flags.check(path)?;
        let key = normalize(path)?;
        let now = self.now();
        let mut files = self.lock();

        match files.get_mut(&key) {
            Some(_) if flags.create && flags.exclusive => {
                return Err(FsError::AlreadyExists(path.to_string()));
            }
            Some(entry) => {
                if flags.truncate {
                    entry.data.clear();
                    entry.modified = now;
                }
            }
            None if !flags.create => {
                if is_dir(&files, &key) {
                    return Err(FsError::IsADirectory(path.to_string()));
                }
                return Err(FsError::NotFound(path.to_string()));
            }
            None => {
                check_creatable(&files, &key, path)?;
                files.insert(
                    key.clone(),
                    Entry {
                        data: Vec::new(),
                        mode,
                        modified: now,
                    },
                );
            }
        }
        drop(files);

        Ok(Some(Box::new(MemoryWritableFile {
            files: Arc::clone(&self.files),
            clock: Arc::clone(&self.clock),
            key,
            pos: 0,
            append: flags.append,
        })))
    }

    fn remove(&mut self, path: &str) -> FsResult<()> {
        trace!(path = %path, "remove");
        let key = normalize(path)?;
        let mut files = self.lock();
        if files.remove(&key).is_some() {
            return Ok(());
        }
        if key.is_empty() {
            return Err(FsError::InvalidPath(path.to_string()));
        }
        if is_dir(&files, &key) {
            return Err(FsError::DirectoryNotEmpty(path.to_string()));
        }
        Err(FsError::NotFound(path.to_string()))
    }

    fn write_file(&mut self, path: &str, data: &[u8], mode: FileMode) -> FsResult<()> {
        trace!(path = %path, bytes = data.len(), "write_file");
        let key = normalize(path)?;
        let now = self.now();
        let mut files = self.lock();

        match files.get_mut(&key) {
            Some(entry) => {
                entry.data = data.to_vec();
                entry.modified = now;
            }
            None => {
                check_creatable(&files, &key, path)?;
                files.insert(
                    key,
                    Entry {
                        data: data.to_vec(),
                        mode,
                        modified: now,
                    },
                );
            }
        }
        Ok(())
    }
}
