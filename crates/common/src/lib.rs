//! Shared types used across the coursecart crates.

mod types;

pub use types::CustomerId;
