// services/mod.rs
pub mod memory;
pub mod seed;
pub mod storage;

// Ré-exports pour faciliter l'import
pub use memory::MemoryStorage;
pub use storage::{SessionFilter, Storage};
