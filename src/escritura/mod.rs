//! Escritura workflow module
//!
//! Everything between the submission form and the signed-off document lives
//! here: attachment admission, the draft-generation pipeline, the review
//! state machine, dashboard statistics, and text export.

pub mod attachments;
pub mod errors;
pub mod export;
pub mod generator;
pub mod review;
pub mod stats;
pub mod submission;

pub use errors::EscrituraError;
pub use review::Reviewer;

// Re-export commonly used functions
pub use attachments::{PdfAttachment, MAX_ATTACHMENTS};
pub use stats::DashboardStats;
pub use submission::{Submission, SubmissionProgress};
