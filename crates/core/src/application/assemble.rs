// Environment assembly (pure - no ambient process state is read here)

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::adapter::NullDevice;
use crate::application::constants::KIND_VARIABLE;
use crate::domain::{parse_environ, Environment, EnvironmentKind, ProcessSnapshot, Variables};
use crate::port::{Filesystem, RandomSource, Stream};

/// Stream and filesystem handles an Environment is wired to
pub struct Resources {
    pub input: Box<dyn Stream>,
    pub output: Box<dyn Stream>,
    pub error: Box<dyn Stream>,
    pub filesystem: Box<dyn Filesystem>,
}

impl Resources {
    /// Every handle bound to the NullDevice
    pub fn null() -> Self {
        Self {
            input: Box::new(NullDevice),
            output: Box::new(NullDevice),
            error: Box::new(NullDevice),
            filesystem: Box::new(NullDevice),
        }
    }
}

impl Environment {
    /// Assemble a process-bound ("cli") Environment from a snapshot
    ///
    /// Inherited variables are imported, then the kind marker is set to
    /// "cli" (overwriting an inherited variable of that name). Randomness is
    /// seeded from `snapshot.seed`.
    ///
    /// # Panics
    /// If an environment entry has no `=`. The host process table is assumed
    /// well-formed; a broken one is not recoverable here.
    pub fn assemble_process(snapshot: ProcessSnapshot, resources: Resources) -> Self {
        let mut variables = match parse_environ(&snapshot.environ) {
            Ok(vars) => vars,
            Err(e) => panic!("corrupt process environment: {e}"),
        };
        variables.insert(
            KIND_VARIABLE.to_string(),
            EnvironmentKind::Cli.as_str().to_string(),
        );

        let randomness: Box<dyn RandomSource> =
            Box::new(StdRng::seed_from_u64(snapshot.seed as u64));

        debug!(
            kind = %EnvironmentKind::Cli,
            variables = variables.len(),
            arguments = snapshot.arguments.len(),
            "Process environment assembled"
        );

        Self {
            input: resources.input,
            output: resources.output,
            error: resources.error,
            randomness: Some(randomness),
            filesystem: resources.filesystem,
            variables,
            arguments: snapshot.arguments,
        }
    }

    /// Assemble a hermetic ("testing") Environment
    ///
    /// `randomness` may be None when the code under test never draws random
    /// numbers.
    pub fn assemble_testing(
        randomness: Option<Box<dyn RandomSource>>,
        resources: Resources,
    ) -> Self {
        let mut variables = Variables::new();
        variables.insert(
            KIND_VARIABLE.to_string(),
            EnvironmentKind::Testing.as_str().to_string(),
        );

        debug!(
            kind = %EnvironmentKind::Testing,
            randomness = randomness.is_some(),
            "Testing environment assembled"
        );

        Self {
            input: resources.input,
            output: resources.output,
            error: resources.error,
            randomness,
            filesystem: resources.filesystem,
            variables,
            arguments: Vec::new(),
        }
    }

    /// Environment where every operation is a no-op
    ///
    /// No randomness, no arguments, and an empty variable table (no kind
    /// marker).
    pub fn for_null() -> Self {
        let resources = Resources::null();
        Self {
            input: resources.input,
            output: resources.output,
            error: resources.error,
            randomness: None,
            filesystem: resources.filesystem,
            variables: Variables::new(),
            arguments: Vec::new(),
        }
    }
}
