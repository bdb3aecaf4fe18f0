// OS filesystem adapter
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::trace;

use cmdenv_core::error::{FsError, FsResult};
use cmdenv_core::port::{File, FileInfo, FileMode, Filesystem, OpenFlags, WritableFile};

/// Filesystem backed by the real OS
///
/// Unrooted: paths are used as given (relative to the working directory).
/// Rooted: relative paths resolve under the base directory; absolute paths
/// are used as given.
#[derive(Debug, Clone, Default)]
pub struct OsFilesystem {
    root: Option<PathBuf>,
}

impl OsFilesystem {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative paths under `base`
    pub fn rooted(base: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(base.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) if Path::new(path).is_relative() => root.join(path),
            _ => PathBuf::from(path),
        }
    }
}

/// Open OS file plus the name it was opened under
struct OsFile {
    file: fs::File,
    name: String,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for OsFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl File for OsFile {
    fn stat(&self) -> FsResult<FileInfo> {
        let meta = self
            .file
            .metadata()
            .map_err(|e| FsError::from_io(&self.name, e))?;
        Ok(file_info(base_name(&self.name), &meta))
    }
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(unix)]
fn mode_of(meta: &Metadata) -> FileMode {
    use std::os::unix::fs::PermissionsExt;
    FileMode(meta.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn mode_of(meta: &Metadata) -> FileMode {
    if meta.is_dir() {
        FileMode::DEFAULT_DIR
    } else if meta.permissions().readonly() {
        FileMode(0o444)
    } else {
        FileMode::DEFAULT_FILE
    }
}

fn file_info(name: String, meta: &Metadata) -> FileInfo {
    FileInfo {
        name,
        size: meta.len(),
        is_dir: meta.is_dir(),
        mode: mode_of(meta),
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
    }
}

/// Options for a writable open; `readable` adds read access
fn open_options(flags: OpenFlags, mode: FileMode, readable: bool) -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.read(readable).write(true);
    if flags.append {
        opts.append(true);
    }
    if flags.truncate {
        opts.truncate(true);
    }
    if flags.create && flags.exclusive {
        opts.create_new(true);
    } else if flags.create {
        opts.create(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(mode.bits());
    }
    #[cfg(not(unix))]
    let _ = mode;

    opts
}

impl Filesystem for OsFilesystem {
    fn open(&self, path: &str) -> FsResult<Option<Box<dyn File>>> {
        trace!(path = %path, "open");
        let file = fs::File::open(self.resolve(path)).map_err(|e| FsError::from_io(path, e))?;
        Ok(Some(Box::new(OsFile {
            file,
            name: path.to_string(),
        })))
    }

    fn read_dir(&self, path: &str) -> FsResult<Option<Vec<FileInfo>>> {
        trace!(path = %path, "read_dir");
        let resolved = self.resolve(path);
        if resolved.is_file() {
            return Err(FsError::NotADirectory(path.to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&resolved).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry?;
            let meta = entry.metadata()?;
            entries.push(file_info(
                entry.file_name().to_string_lossy().into_owned(),
                &meta,
            ));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(entries))
    }

    fn read_file(&self, path: &str) -> FsResult<Option<Vec<u8>>> {
        trace!(path = %path, "read_file");
        let resolved = self.resolve(path);
        if resolved.is_dir() {
            return Err(FsError::IsADirectory(path.to_string()));
        }
        let data = fs::read(resolved).map_err(|e| FsError::from_io(path, e))?;
        Ok(Some(data))
    }

    fn stat(&self, path: &str) -> FsResult<Option<FileInfo>> {
        trace!(path = %path, "stat");
        let meta = fs::metadata(self.resolve(path)).map_err(|e| FsError::from_io(path, e))?;
        Ok(Some(file_info(base_name(path), &meta)))
    }

    fn open_for_write(
        &mut self,
        path: &str,
        flags: OpenFlags,
        mode: FileMode,
    ) -> FsResult<Option<Box<dyn WritableFile>>> {
        trace!(path = %path, ?flags, "open_for_write");
        flags.check(path)?;
        let resolved = self.resolve(path);
        // Write-only files still open; reads on such a handle fail
        let file = match open_options(flags, mode, true).open(&resolved) {
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                open_options(flags, mode, false).open(&resolved)
            }
            other => other,
        }
        .map_err(|e| FsError::from_io(path, e))?;
        Ok(Some(Box::new(OsFile {
            file,
            name: path.to_string(),
        })))
    }

    fn remove(&mut self, path: &str) -> FsResult<()> {
        trace!(path = %path, "remove");
        let resolved = self.resolve(path);
        let meta = fs::symlink_metadata(&resolved).map_err(|e| FsError::from_io(path, e))?;
        if meta.is_dir() {
            let non_empty = fs::read_dir(&resolved)?.next().is_some();
            if non_empty {
                return Err(FsError::DirectoryNotEmpty(path.to_string()));
            }
            fs::remove_dir(&resolved).map_err(|e| FsError::from_io(path, e))
        } else {
            fs::remove_file(&resolved).map_err(|e| FsError::from_io(path, e))
        }
    }

    fn write_file(&mut self, path: &str, data: &[u8], mode: FileMode) -> FsResult<()> {
        trace!(path = %path, bytes = data.len(), "write_file");
        let mut file = open_options(OpenFlags::CREATE_TRUNCATE, mode, false)
            .open(self.resolve(path))
            .map_err(|e| FsError::from_io(path, e))?;
        file.write_all(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted_tmp() -> (tempfile::TempDir, OsFilesystem) {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFilesystem::rooted(dir.path());
        (dir, fs)
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, mut fs) = rooted_tmp();

        fs.write_file("hello.txt", b"hi there", FileMode::DEFAULT_FILE)
            .unwrap();

        assert_eq!(fs.read_file("hello.txt").unwrap().unwrap(), b"hi there");
        let info = fs.stat("hello.txt").unwrap().unwrap();
        assert_eq!(info.name, "hello.txt");
        assert_eq!(info.size, 8);
        assert!(!info.is_dir);
        assert!(info.modified.is_some());
    }

    #[test]
    fn test_open_reads_contents_and_stats() {
        let (_dir, mut fs) = rooted_tmp();
        fs.write_file("a.txt", b"abc", FileMode::DEFAULT_FILE).unwrap();

        let mut file = fs.open("a.txt").unwrap().unwrap();
        let mut buf = String::new();
        file.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "abc");
        assert_eq!(file.stat().unwrap().size, 3);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, fs) = rooted_tmp();
        assert!(matches!(fs.open("nope"), Err(FsError::NotFound(_))));
        assert!(matches!(fs.read_file("nope"), Err(FsError::NotFound(_))));
        assert!(matches!(fs.stat("nope"), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_open_for_write_append_and_exclusive() {
        let (_dir, mut fs) = rooted_tmp();

        {
            let mut f = fs
                .open_for_write("log.txt", OpenFlags::CREATE_APPEND, FileMode::DEFAULT_FILE)
                .unwrap()
                .unwrap();
            f.write_all(b"one\n").unwrap();
        }
        {
            let mut f = fs
                .open_for_write("log.txt", OpenFlags::CREATE_APPEND, FileMode::DEFAULT_FILE)
                .unwrap()
                .unwrap();
            f.write_all(b"two\n").unwrap();
        }
        assert_eq!(fs.read_file("log.txt").unwrap().unwrap(), b"one\ntwo\n");

        let err = fs
            .open_for_write("log.txt", OpenFlags::CREATE_NEW, FileMode::DEFAULT_FILE)
            .err()
            .unwrap();
        assert!(matches!(err, FsError::AlreadyExists(_)));

        let err = fs
            .open_for_write("missing.txt", OpenFlags::default(), FileMode::DEFAULT_FILE)
            .err()
            .unwrap();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn test_read_dir_sorted_and_remove() {
        let (dir, mut fs) = rooted_tmp();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        fs.write_file("b.txt", b"", FileMode::DEFAULT_FILE).unwrap();
        fs.write_file("a.txt", b"", FileMode::DEFAULT_FILE).unwrap();
        fs.write_file("sub/c.txt", b"", FileMode::DEFAULT_FILE).unwrap();

        let names: Vec<String> = fs
            .read_dir(".")
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);

        assert!(matches!(
            fs.remove("sub"),
            Err(FsError::DirectoryNotEmpty(_))
        ));
        fs.remove("sub/c.txt").unwrap();
        fs.remove("sub").unwrap();
        assert!(matches!(fs.stat("sub"), Err(FsError::NotFound(_))));
        assert!(matches!(fs.remove("sub"), Err(FsError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_applies_mode() {
        let (_dir, mut fs) = rooted_tmp();
        fs.write_file("secret", b"x", FileMode(0o600)).unwrap();
        assert_eq!(fs.stat("secret").unwrap().unwrap().mode, FileMode(0o600));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_only_file_can_be_replaced_and_reopened() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, mut fs) = rooted_tmp();
        fs.write_file("wo", b"first", FileMode(0o200)).unwrap();
        fs.write_file("wo", b"second", FileMode(0o200)).unwrap();

        {
            let mut f = fs
                .open_for_write("wo", OpenFlags::CREATE_APPEND, FileMode(0o200))
                .unwrap()
                .unwrap();
            f.write_all(b"+more").unwrap();
        }

        let on_disk = dir.path().join("wo");
        std::fs::set_permissions(&on_disk, std::fs::Permissions::from_mode(0o600)).unwrap();
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"second+more");
    }

    #[test]
    fn test_append_with_truncate_is_rejected() {
        let (_dir, mut fs) = rooted_tmp();
        let flags = OpenFlags {
            truncate: true,
            ..OpenFlags::CREATE_APPEND
        };

        let err = fs
            .open_for_write("log.txt", flags, FileMode::DEFAULT_FILE)
            .err()
            .unwrap();
        assert!(matches!(err, FsError::InvalidFlags { .. }));
        assert!(matches!(fs.stat("log.txt"), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_rooted_resolution() {
        let fs = OsFilesystem::rooted("/base");
        assert_eq!(fs.resolve("x/y"), PathBuf::from("/base/x/y"));
        assert_eq!(fs.resolve("/abs"), PathBuf::from("/abs"));
        assert_eq!(OsFilesystem::new().resolve("x"), PathBuf::from("x"));
    }
}
