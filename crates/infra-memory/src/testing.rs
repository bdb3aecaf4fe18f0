// Testing Environment (hermetic composition of in-memory adapters)
use cmdenv_core::port::RandomSource;
use cmdenv_core::{Environment, Resources};

use crate::{MemoryFilesystem, MemoryStream};

/// Fully isolated Environment for tests
///
/// Fresh, empty in-memory streams and a fresh in-memory filesystem on every
/// call; variables hold only the "testing" marker; no arguments.
/// Pass a seeded generator for deterministic randomness, or None when the
/// code under test never draws random numbers.
///
/// # Example
/// ```ignore
/// let mut env = for_testing(Some(Box::new(StdRng::seed_from_u64(7))));
/// run_command(&mut env)?;
/// assert_eq!(env.drain_output(), b"done\n");
/// ```
pub fn for_testing(randomness: Option<Box<dyn RandomSource>>) -> Environment {
    let resources = Resources {
        input: Box::new(MemoryStream::new()),
        output: Box::new(MemoryStream::new()),
        error: Box::new(MemoryStream::new()),
        filesystem: Box::new(MemoryFilesystem::new()),
    };
    Environment::assemble_testing(randomness, resources)
}
