//! Shared configuration, error and wire types for the deposit address service.

pub mod config;
pub mod error;
pub mod types;
