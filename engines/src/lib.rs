//! Database engine specs for the Sightline analytics server
//!
//! Each supported datastore gets an engine spec: a stateless translation
//! layer that tells the query builder how to render time-grain buckets,
//! timestamp literals, and driver connection arguments for that engine.
//! Specs are registered once at startup in an [`engines::EngineRegistry`]
//! and looked up by engine identifier at query-build time.

pub mod engines;
pub mod error;
pub mod utils;
