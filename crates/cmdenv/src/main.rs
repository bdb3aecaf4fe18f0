//! cmdenv-inspect - print what a process-bound Environment sees
//!
//! Writes a JSON report (kind, arguments, variable count, a random sample)
//! to the Environment's output stream.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::info;

use cmdenv::logging::{self, LogFormat};
use cmdenv::{Environment, EnvironmentKind, RandomSource, VERSION};

#[derive(Debug, Serialize)]
struct Report<'a> {
    version: &'static str,
    kind: Option<EnvironmentKind>,
    arguments: &'a [String],
    variable_count: usize,
    random_sample: Option<i64>,
}

fn report(env: &mut Environment) -> Result<()> {
    let random_sample = env.randomness.as_mut().map(|r| r.next_i64());
    let report = Report {
        version: VERSION,
        kind: env.kind(),
        arguments: &env.arguments,
        variable_count: env.variables.len(),
        random_sample,
    };

    let json = serde_json::to_string_pretty(&report)?;
    writeln!(env.output, "{}", json)?;
    env.output.flush()?;
    Ok(())
}

fn run() -> Result<()> {
    info!("cmdenv-inspect v{} starting", VERSION);
    let mut env = cmdenv::for_process();
    report(&mut env)
}

fn main() -> Result<()> {
    // Subscriber must be installed before the environment is assembled
    logging::init(LogFormat::from_env())?;
    run()
}
