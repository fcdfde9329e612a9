//! Entity structs for the two systems Ferry bridges.
//!
//! `Issue` is a read-only snapshot from the tracker. `Task` mirrors the
//! task-list service's resource, including fields Ferry never interprets, so a
//! fetched task can be written back without losing data.

mod due_format;
mod issue;
mod task;

pub use issue::Issue;
pub use task::{Task, TaskDraft};
