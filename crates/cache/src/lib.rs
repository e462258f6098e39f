//! Content-addressed cache for downloaded novels.
//!
//! This crate provides the store that makes a download resumable. It is the
//! single source of truth for "has this been fetched yet": chapter lists and
//! chapter payloads are written here as soon as they are available, so a run
//! that gets interrupted picks up exactly where it left off.
//!
//! # Architecture
//! - **Keys** are logical identities (URLs in practice). They are never
//!   stored, only their BLAKE3 [`digest`].
//! - **Entries** are one file per digest inside the cache directory. Nothing
//!   is ever evicted; the cache grows with every novel downloaded.

pub mod error;
mod store;

pub use crate::store::{Store, digest};
