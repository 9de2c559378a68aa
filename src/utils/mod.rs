//! Utility modules

pub mod encoding;
pub mod memory_storage;
pub mod validation;

pub use encoding::*;
pub use memory_storage::*;
pub use validation::*;
