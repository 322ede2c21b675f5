//! ECS resources: the long-lived data the dispatcher and systems work on.
//!
//! Overview
//! - [`frameclock`] – fixed-cadence tick counter and time bookkeeping
//! - [`handlers`] – user-registered event handlers, per category
//! - [`input`] – per-tick input state and the host input channel
//! - [`loopcontrol`] – cooperative loop-termination flag
//! - [`stage`] – dimensions, background, ordered roster, deferred removal
//! - [`stageconfig`] – INI-backed configuration with safe defaults

pub mod frameclock;
pub mod handlers;
pub mod input;
pub mod loopcontrol;
pub mod stage;
pub mod stageconfig;
