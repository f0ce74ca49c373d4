//! # Actor Module
//!
//! Collaborator-facing async layer. Long-running external calls (speech
//! synthesis, text generation) run behind actor handles over mpsc channels;
//! the datastore and webhook clients are plain request/response structs.
//! The supervisor orchestrates all of them per request.

pub mod generator;
pub mod messages;
pub mod notifier;
pub mod speech;
pub mod store;
pub mod supervisor;
pub mod traits;

pub use supervisor::SupervisorHandle;
