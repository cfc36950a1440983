//! Storage layer
//!
//! Uses SQLite (embedded), one connection per operation.

pub mod db;

pub use db::Database;
