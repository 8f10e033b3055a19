//! Persistence layer for the warehouse collections.
//!
//! # Overview
//!
//! Three independent resources, one JSON file each, all inside a
//! caller-supplied data directory:
//!
//! ```text
//! <data dir>/
//! ├── users.json       # registered accounts
//! ├── groups.json      # groups and their member lists
//! └── messages.json    # full message history
//! ```
//!
//! # Design Principles
//!
//! ## Atomic Writes
//!
//! All save operations use write-then-rename to prevent corruption:
//!
//! 1. Write to `<name>.json.tmp`
//! 2. Rename to `<name>.json` (atomic on Unix)
//!
//! ## Independent Resources
//!
//! Saving or loading one resource never depends on the others. A failure
//! is logged, that resource is skipped (on load its collection stays
//! empty), and the pass continues. A missing file on load is not a
//! failure at all.
//!
//! ## Records, Not Entities
//!
//! The on-disk schema ([`types`]) is a separate set of plain record
//! structs; entities never serialize themselves. Decoding routes back
//! through the entity constructors, so a tampered file cannot produce an
//! entity with an empty required field.

pub mod store;
pub mod types;

pub use store::{load, save, StorageError};
pub use types::{ContactKind, ContactRecord, GroupRecord, MessageRecord, UserRecord};
