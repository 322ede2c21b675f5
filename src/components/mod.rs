//! ECS components for stage entities.
//!
//! Transform State is deliberately split into small per-attribute
//! components so animation tasks acting on disjoint attributes compose
//! without touching each other.
//!
//! Submodules overview:
//! - [`anchor`] – which point of the bounds the position refers to
//! - [`animations`] – per-entity animation task list and state machine
//! - [`flip`] – horizontal/vertical mirror flags
//! - [`opacity`] – alpha in 0.0..=1.0
//! - [`position`] – stage-space position (or local offset for group members)
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – independent x/y scale factors
//! - [`shape`] – pure drawing data for the external renderer
//! - [`size`] – base drawable size before scaling
//! - [`visibility`] – shown/hidden flag

pub mod anchor;
pub mod animations;
pub mod flip;
pub mod opacity;
pub mod position;
pub mod rotation;
pub mod scale;
pub mod shape;
pub mod size;
pub mod visibility;
