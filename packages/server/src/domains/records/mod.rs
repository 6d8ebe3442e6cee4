pub mod data;
pub mod errors;
pub mod models;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use data::RecordInput;
pub use errors::RecordError;
pub use models::{Record, RecordFilter};
pub use service::RecordService;
pub use validation::{FieldErrors, ValidRecord};
