//! Git operations for a freshly cloned project
//!
//! Handles:
//! - Dropping the template's inherited history
//! - Starting a fresh repository
//! - Staging, committing and pushing the initial state

mod operations;

pub use operations::{add_all, commit, init, push, remove_metadata};
