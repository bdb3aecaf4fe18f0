// Process snapshot - the ambient process state, captured once

use crate::domain::Variables;
use crate::error::EnvironmentError;
use crate::port::Clock;

/// Everything the process-bound constructor reads from the host process
///
/// Capturing happens in one place; assembly from a snapshot is pure, so a
/// snapshot can be built by hand in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSnapshot {
    /// `KEY=VALUE` entries
    pub environ: Vec<String>,
    /// Argument vector, program path first
    pub arguments: Vec<String>,
    /// Randomness seed (wall-clock nanos for real processes)
    pub seed: i64,
}

impl ProcessSnapshot {
    /// Read environment, argument vector and clock from the current process
    pub fn capture(clock: &dyn Clock) -> Self {
        let environ = std::env::vars_os()
            .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            .collect();
        let arguments = std::env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        Self {
            environ,
            arguments,
            seed: clock.now_nanos(),
        }
    }
}

/// Build a variable table from `KEY=VALUE` entries
///
/// Splits at the first `=` only; later duplicates win.
pub fn parse_environ<S: AsRef<str>>(entries: &[S]) -> Result<Variables, EnvironmentError> {
    entries
        .iter()
        .map(|entry| {
            let entry = entry.as_ref();
            entry
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| EnvironmentError::MalformedEntry(entry.to_string()))
        })
        .collect()
}
