// Process-bound Environment (composition of OS adapters)
use std::path::PathBuf;
use tracing::info;

use cmdenv_core::port::SystemClock;
use cmdenv_core::{Environment, ProcessSnapshot, Resources};

use crate::{OsFilesystem, StdStream};

/// Environment wired to the real process
///
/// Streams are stdin/stdout/stderr, the filesystem is the OS filesystem
/// (paths as given), variables are the inherited environment plus the "cli"
/// marker, arguments are the process argument vector, and randomness is
/// seeded from the wall clock (not reproducible - do not use in tests).
///
/// Each call re-reads the current process state.
///
/// # Panics
/// If the process environment contains an entry without `=`.
pub fn for_process() -> Environment {
    assemble(OsFilesystem::new())
}

/// Like `for_process`, with relative filesystem paths resolved under `base_dir`
pub fn for_process_in(base_dir: impl Into<PathBuf>) -> Environment {
    assemble(OsFilesystem::rooted(base_dir))
}

fn assemble(filesystem: OsFilesystem) -> Environment {
    if let Some(root) = filesystem.root() {
        info!(root = %root.display(), "Binding process environment to base directory");
    }

    let snapshot = ProcessSnapshot::capture(&SystemClock);
    let resources = Resources {
        input: Box::new(StdStream::stdin()),
        output: Box::new(StdStream::stdout()),
        error: Box::new(StdStream::stderr()),
        filesystem: Box::new(filesystem),
    };

    Environment::assemble_process(snapshot, resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdenv_core::application::constants::KIND_VARIABLE;
    use cmdenv_core::port::FileMode;
    use cmdenv_core::EnvironmentKind;

    #[test]
    fn test_process_environment_reflects_process() {
        let env = for_process();

        assert_eq!(env.variables[KIND_VARIABLE], "cli");
        assert_eq!(env.kind(), Some(EnvironmentKind::Cli));
        assert!(env.randomness.is_some());

        let args: Vec<String> = std::env::args().collect();
        assert!(!env.arguments.is_empty());
        assert_eq!(env.arguments, args);
    }

    #[test]
    fn test_process_environment_imports_variables() {
        // PATH is set for any cargo-driven test run
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(for_process().variable("PATH"), Some(path.as_str()));
        }
    }

    #[test]
    fn test_base_directory_scopes_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = for_process_in(dir.path());

        env.filesystem
            .write_file("scoped.txt", b"inside", FileMode::DEFAULT_FILE)
            .unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("scoped.txt")).unwrap(),
            b"inside"
        );
    }
}
