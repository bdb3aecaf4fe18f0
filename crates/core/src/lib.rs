// cmdenv Core - Execution Environment & Ports
// NO infrastructure dependencies (adapters live in infra-system / infra-memory)

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use adapter::NullDevice;
pub use application::Resources;
pub use domain::{Environment, EnvironmentKind, ProcessSnapshot, Variables};
pub use error::{EnvironmentError, FsError, FsResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
