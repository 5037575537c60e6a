//! Named-record store implementations.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
