// Adapters that ship with the core

pub mod null_device;

pub use null_device::NullDevice;
