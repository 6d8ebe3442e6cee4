// Business domains
pub mod records;
