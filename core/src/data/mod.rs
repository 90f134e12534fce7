//! Persistence — repository traits and the in-memory store that implements them.
//!
//! The write path in `cms` only talks to the traits in `repo`; `memory`
//! provides the one backend, serialisable to a JSON snapshot on disk.

pub mod memory;
pub mod repo;
