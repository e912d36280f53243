//! Step definitions for pinning aggregation scenarios.

mod given;
mod then;
mod when;
pub mod world;
