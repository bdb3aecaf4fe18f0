//! cmdenv - execution environments for command-style programs
//!
//! A command takes `&mut Environment` and only talks to its streams,
//! filesystem, randomness, variables and arguments. Three constructors
//! decide what those are bound to:
//!
//! - [`for_process`]: the real process (stdio, OS filesystem, env, argv)
//! - [`for_testing`]: in-memory streams and filesystem, caller-chosen randomness
//! - [`for_null`]: everything discarded, for benchmarking

pub mod logging;

pub use cmdenv_core::application::constants::KIND_VARIABLE;
pub use cmdenv_core::error::{EnvironmentError, FsError, FsResult};
pub use cmdenv_core::port::{
    Clock, File, FileInfo, FileMode, Filesystem, OpenFlags, RandomSource, Stream, SystemClock,
    WritableFile,
};
pub use cmdenv_core::{Environment, EnvironmentKind, NullDevice, ProcessSnapshot, Resources};
pub use cmdenv_infra_memory::{for_testing, MemoryFilesystem, MemoryStream};
pub use cmdenv_infra_system::{for_process, for_process_in, OsFilesystem, StdStream};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment where every operation is a no-op (see [`NullDevice`])
pub fn for_null() -> Environment {
    Environment::for_null()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    /// Stand-in for a command: greets the first argument or "world"
    fn greet(env: &mut Environment) -> std::io::Result<()> {
        let name = env.arguments.get(1).cloned().unwrap_or_else(|| "world".to_string());
        let lucky = env.randomness.as_mut().map(|r| r.next_i64().rem_euclid(100));
        match lucky {
            Some(n) => writeln!(env.output, "hello, {} ({})", name, n),
            None => writeln!(env.output, "hello, {}", name),
        }
    }

    #[test]
    fn test_same_command_runs_in_testing_and_null() {
        let mut testing = for_testing(None);
        greet(&mut testing).unwrap();
        assert_eq!(testing.drain_output(), b"hello, world\n");

        let mut null = for_null();
        greet(&mut null).unwrap();
        assert!(null.drain_output().is_empty());
    }

    #[test]
    fn test_command_randomness_is_deterministic_under_seed() {
        let mut a = for_testing(Some(Box::new(StdRng::seed_from_u64(11))));
        let mut b = for_testing(Some(Box::new(StdRng::seed_from_u64(11))));
        greet(&mut a).unwrap();
        greet(&mut b).unwrap();
        assert_eq!(a.drain_output(), b.drain_output());
    }
}
