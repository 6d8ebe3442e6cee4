pub mod filter;
pub mod record;

pub use filter::RecordFilter;
pub use record::Record;
