//! # ferry-core
//!
//! Core types, sync rules, and error types for Ferry.
//!
//! This crate provides the foundational types shared across all Ferry crates:
//! - Entity structs for tracker issues and task-list tasks
//! - The task status enum
//! - The relevance filter and the title-substring join between issues and tasks
//! - The weekend-skipping default due date
//! - A clock abstraction so time-dependent rules can be tested
//! - Cross-cutting error types

pub mod clock;
pub mod due;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod linking;
pub mod relevance;
