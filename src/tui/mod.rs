//! Terminal UI for the cartório workflow
//!
//! Three working screens plus a help screen: the dashboard lists recent
//! escrituras with summary counters, the submission form collects the data
//! and PDF attachments for a new escritura, and the review screen is where a
//! clerk edits, approves or rejects the generated draft.

pub mod app;
pub mod editor;
pub mod screens;
pub mod ui;

pub use app::App;
