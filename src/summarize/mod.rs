//! Summarization handoff to an external collaborator process.

mod body_file;
mod command;

pub use body_file::BodyFile;
pub use command::{Summarizer, DEFAULT_TIMEOUT};
