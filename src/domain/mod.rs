//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: entity types as the API returns them
//! - `wire.rs`: request bodies, query builders and list envelopes
//! - `client.rs`: sub-client with the HTTP methods

pub mod tag;
pub mod trade;
