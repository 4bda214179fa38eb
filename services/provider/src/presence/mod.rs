//! Data-presence oracle.
//!
//! Answers "does backing data exist" for the validation endpoint and lets the
//! provider-state dispatcher change that answer. The validation endpoint only
//! reads; it never caches and never assumes an initial state.

mod file;
mod memory;

pub use file::FileDataPresence;
pub use memory::InMemoryDataPresence;

use std::io;

/// Existence marker for the provider's backing data.
///
/// Implementations must be cheap to query on every request and must reflect
/// the latest write immediately. Mutators are idempotent.
pub trait DataPresence: Send + Sync + std::fmt::Debug {
    /// Whether backing data currently exists.
    fn exists(&self) -> bool;

    /// Make [`exists`](Self::exists) report `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be created.
    fn set_present(&self) -> io::Result<()>;

    /// Make [`exists`](Self::exists) report `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be removed.
    fn set_absent(&self) -> io::Result<()>;

    /// Return to the initial state between independent test runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be removed.
    fn reset(&self) -> io::Result<()> {
        self.set_absent()
    }
}
