//! Object store implementations.

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemObjectStore;
pub use memory::InMemoryObjectStore;
