// cmdenv Infrastructure - OS Adapters
// Implements: Filesystem (OsFilesystem), Stream (StdStream), process-bound Environment

pub mod os_filesystem;
pub mod process;
pub mod std_stream;

pub use os_filesystem::OsFilesystem;
pub use process::{for_process, for_process_in};
pub use std_stream::StdStream;
