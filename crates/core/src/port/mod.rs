// Port Layer - Capability contracts consumed by the Environment

pub mod clock; // For deterministic seeding in tests
pub mod filesystem;
pub mod randomness;
pub mod stream;

// Re-exports
pub use clock::{Clock, SystemClock};
pub use filesystem::{File, FileInfo, FileMode, Filesystem, OpenFlags, WritableFile};
pub use randomness::RandomSource;
pub use stream::Stream;
