//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PgRecordStore, ServerDeps};
pub use test_dependencies::{InMemoryRecordStore, TestDependencies};
pub use traits::*;
