//! Data models for résumé parsing.

pub mod config;
pub mod resume;
