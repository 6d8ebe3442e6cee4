// Student Records - API Core
//
// This crate provides the backend API for managing student records.
// Requests flow handler -> RecordService -> BaseRecordStore (Postgres in production).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
