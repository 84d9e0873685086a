//! Core types shared across pcbdiff crates
//!
//! This crate provides the small leaf types used by the engine, the file
//! store and the CLI:
//!
//! - **Slot**: which file a layout was loaded into (Golden Reference A or
//!   Unit Under Test B)
//! - **Schema constants**: Canonical field keys and event names for
//!   structured logging

pub mod schema;
pub mod slot;

pub use slot::Slot;
