//! Typed ID definitions for domain entities.
//!
//! # Example
//!
//! ```rust
//! use records_core::common::RecordId;
//!
//! let id = RecordId::from_i64(1);
//! assert_eq!(id.to_string(), "1");
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for student Record entities.
pub struct StudentRecord;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for student Record entities.
pub type RecordId = Id<StudentRecord>;
