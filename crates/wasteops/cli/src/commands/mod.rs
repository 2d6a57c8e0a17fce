//! CLI commands

pub mod access;
pub mod audit;
pub mod institutions;
