//! Per-tick passes and on-demand queries over the world.
//!
//! Submodules overview
//! - [`animation`] – advance every entity's animation task list
//! - [`collision`] – on-demand AABB overlap and point queries
//! - [`group`] – resolve group-composed placements top-down
//! - [`input`] – drain the host input channel into the per-tick frame
//! - [`snapshot`] – read-only serializable scene view for the renderer
//! - [`time`] – advance the fixed-cadence frame clock

pub mod animation;
pub mod collision;
pub mod group;
pub mod input;
pub mod snapshot;
pub mod time;
