// Domain Layer - the Execution Environment and what it is built from

pub mod environment;
pub mod kind;
pub mod snapshot;

// Re-exports
pub use environment::{Environment, Variables};
pub use kind::EnvironmentKind;
pub use snapshot::{parse_environ, ProcessSnapshot};
