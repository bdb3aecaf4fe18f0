// cmdenv Infrastructure - In-Memory Adapters
// Implements: Stream (MemoryStream), Filesystem (MemoryFilesystem), testing Environment

pub mod memory_filesystem;
pub mod memory_stream;
pub mod testing;

pub use memory_filesystem::MemoryFilesystem;
pub use memory_stream::MemoryStream;
pub use testing::for_testing;
