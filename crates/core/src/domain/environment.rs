// Execution Environment - streams, filesystem, randomness, variables, arguments

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use crate::application::constants::KIND_VARIABLE;
use crate::domain::EnvironmentKind;
use crate::port::{Filesystem, RandomSource, Stream};

/// Variable table (string keys, string values)
pub type Variables = HashMap<String, String>;

/// Everything a command runs against
///
/// Built once by one of the constructors; the set of fields is fixed
/// afterwards. Streams are stateful: draining consumes what was buffered.
/// No internal synchronization - serialize access if you share it.
pub struct Environment {
    pub input: Box<dyn Stream>,
    pub output: Box<dyn Stream>,
    pub error: Box<dyn Stream>,
    /// None when the program performs no randomized behavior
    pub randomness: Option<Box<dyn RandomSource>>,
    pub filesystem: Box<dyn Filesystem>,
    pub variables: Variables,
    pub arguments: Vec<String>,
}

impl Environment {
    /// Read everything currently available on the output stream
    pub fn drain_output(&mut self) -> Vec<u8> {
        drain(self.output.as_mut())
    }

    /// Read everything currently available on the error stream
    pub fn drain_error(&mut self) -> Vec<u8> {
        drain(self.error.as_mut())
    }

    /// Read everything currently available on the input stream
    pub fn drain_input(&mut self) -> Vec<u8> {
        drain(self.input.as_mut())
    }

    /// Kind marker; None for the null environment
    pub fn kind(&self) -> Option<EnvironmentKind> {
        self.variable(KIND_VARIABLE).and_then(EnvironmentKind::parse)
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// Read to end; a failing read keeps whatever arrived before it
fn drain(stream: &mut dyn Stream) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Err(e) = stream.read_to_end(&mut buf) {
        tracing::trace!(error = %e, drained = buf.len(), "Drain stopped on read error");
    }
    buf
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("kind", &self.kind())
            .field("randomness", &self.randomness.is_some())
            .field("variables", &self.variables)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
