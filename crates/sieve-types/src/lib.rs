//! Sieve Types
//!
//! This crate defines the leaf data structures shared by the Sieve facet engine: the
//! typed `RecordValue` tree that ingested JSON records are decoded into, and the
//! `UniqueStringSet` that holds the distinct raw values observed for a facet.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]

mod string_set;
mod types;

pub use string_set::UniqueStringSet;
pub use types::RecordValue;
