//! Easel runtime core.
//!
//! The headless heart of a classroom 2D drawing/animation toolkit: a scene
//! of shape entities, a fixed-cadence event loop dispatching to
//! user-registered handlers, a per-entity animation scheduler, and
//! on-demand overlap queries. Rendering, fonts, images, and windowing are
//! external collaborators: they consume [`systems::snapshot::snapshot`]
//! and feed input through [`resources::input::InputFeed`].
//!
//! - [`components`] – Transform State and animation tasks per entity
//! - [`resources`] – stage, clock, input, handlers, configuration
//! - [`systems`] – per-tick passes and on-demand queries
//! - [`director`] – the tick protocol driver
//! - [`shapes`] / [`animate`] / [`motion`] – the user-facing verbs

pub mod animate;
pub mod components;
pub mod director;
pub mod error;
pub mod math;
pub mod motion;
pub mod resources;
pub mod shapes;
pub mod systems;

pub use director::Director;
pub use error::{Error, Result};
