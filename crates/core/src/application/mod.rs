// Application Layer - assembling Environments

pub mod assemble;
pub mod constants;

pub use assemble::Resources;
