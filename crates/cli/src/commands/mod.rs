//! CLI Commands

pub mod subnet;
