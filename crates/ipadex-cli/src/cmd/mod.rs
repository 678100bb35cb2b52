//! Command modules - one file per CLI command

pub mod export;
pub mod index;
pub mod run;
