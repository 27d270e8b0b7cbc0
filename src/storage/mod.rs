//! Storage implementations for configuration records

pub mod in_memory;

pub use in_memory::InMemoryConfigurationStore;
