//! # ferry-sync
//!
//! The moving parts between the clients and the chat bot:
//!
//! - [`reconcile::Reconciler`] mirrors relevant tracker issues into the task
//!   list, and [`scheduler::spawn_periodic`] runs it on an interval.
//! - [`bus::ListenerBus`] fans chat mutations out to listeners such as
//!   [`mutation::MutationHandler`].
//! - [`notify::TaskBoard`] renders the open tasks and pushes them to the
//!   owner, skipping unchanged bodies.
//!
//! External services sit behind the traits in [`ports`].

pub mod adapters;
pub mod bus;
pub mod list;
pub mod memory;
pub mod mutation;
pub mod notify;
pub mod ports;
pub mod reconcile;
pub mod scheduler;

mod error;

pub use error::SyncError;
