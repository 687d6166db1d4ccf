//! Cartório escritura workflow: submission, draft generation, review, export.

pub mod cli;
pub mod config;
pub mod escritura;
pub mod models;
pub mod storage;
pub mod tui;
