//! # palaver-core
//!
//! The chat data store for Palaver: users, groups, messages, and the
//! save/load cycle that carries them between runs.
//!
//! This crate is framework-agnostic and can be used by:
//! - A socket server (one warehouse shared across client sessions)
//! - A desktop client keeping a local copy of its conversations
//!
//! ## Key Concepts
//!
//! - **Warehouse**: the authoritative, synchronized store of all users,
//!   groups and messages
//! - **Contact**: an addressable chat party - a user, a group, or the
//!   system pseudo-sender
//! - **Projection**: a derived view (conversation threads, latest message
//!   per contact) recomputed on demand, never stored

pub mod entities;
pub mod persistence;
pub mod projections;
pub mod warehouse;

// Re-export commonly used types
pub use entities::{Contact, Group, Message, Recipient, User, ValidationError};
pub use warehouse::{MembershipOutcome, Warehouse, WarehouseError};
