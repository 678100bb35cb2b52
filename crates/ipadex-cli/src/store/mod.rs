//! Persistent record store

pub mod db;

pub use db::{AppDb, DbError, InsertOutcome};
