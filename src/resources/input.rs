//! Per-tick input state and the host-side input bridge.
//!
//! The host (window layer, test harness, replay file) pushes raw
//! [`InputEvent`]s through an [`InputFeed`]; the Director drains the
//! channel exactly once per tick into [`InputFrame`], which is what
//! handler code reads. Keys iterate in `Key` order so per-key dispatch is
//! deterministic regardless of arrival order.

use std::collections::BTreeSet;

use bevy_ecs::prelude::{Resource, World};
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;
use smallvec::SmallVec;

use crate::math::Vec2;

/// Logical key identifiers. Ordering is the dispatch order for key-state
/// handlers when several keys are held at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    Up, Down, Left, Right,
    Space, Enter, Escape, Backspace, Tab, Shift, Control,
}

/// Raw event from the host input source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMoved(Vec2),
    ButtonDown(Vec2),
    ButtonUp(Vec2),
}

/// Input state as observed by the current tick.
#[derive(Resource, Debug, Default)]
pub struct InputFrame {
    pressed: BTreeSet<Key>,
    just_pressed: SmallVec<[Key; 4]>,
    just_released: SmallVec<[Key; 4]>,
    pointer: Vec2,
    button_held: bool,
    /// Press transitions observed this tick, each with the pointer
    /// position carried by its `ButtonDown` event.
    clicks: SmallVec<[Vec2; 2]>,
    released: bool,
}

impl InputFrame {
    /// Clear the per-tick transition lists. Held state carries over.
    pub(crate) fn begin_tick(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.clicks.clear();
        self.released = false;
    }

    pub(crate) fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if self.pressed.insert(key) {
                    self.just_pressed.push(key);
                }
            }
            InputEvent::KeyUp(key) => {
                if self.pressed.remove(&key) {
                    self.just_released.push(key);
                }
            }
            InputEvent::PointerMoved(pos) => self.pointer = pos,
            InputEvent::ButtonDown(pos) => {
                self.pointer = pos;
                if !self.button_held {
                    self.clicks.push(pos);
                }
                self.button_held = true;
            }
            InputEvent::ButtonUp(pos) => {
                self.pointer = pos;
                if self.button_held {
                    self.released = true;
                }
                self.button_held = false;
            }
        }
    }

    /// Currently-held keys in `Key` order.
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter().copied()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn button_held(&self) -> bool {
        self.button_held
    }

    pub fn button_released(&self) -> bool {
        self.released
    }

    /// Press transitions observed this tick, with their click positions.
    pub fn clicks(&self) -> &[Vec2] {
        &self.clicks
    }
}

/// Receiving half of the input channel, owned by the ECS world.
#[derive(Resource)]
pub struct InputBridge {
    pub(crate) rx: Receiver<InputEvent>,
}

/// Cloneable sending half handed to the host. Sending never blocks; events
/// queue until the Director drains them at the top of the next tick.
#[derive(Clone)]
pub struct InputFeed {
    tx: Sender<InputEvent>,
}

impl InputFeed {
    pub fn send(&self, event: InputEvent) {
        // The loop being gone just means nobody is listening anymore.
        let _ = self.tx.send(event);
    }

    pub fn key_down(&self, key: Key) {
        self.send(InputEvent::KeyDown(key));
    }

    pub fn key_up(&self, key: Key) {
        self.send(InputEvent::KeyUp(key));
    }

    pub fn move_pointer(&self, x: f32, y: f32) {
        self.send(InputEvent::PointerMoved(Vec2::new(x, y)));
    }

    pub fn press(&self, x: f32, y: f32) {
        self.send(InputEvent::ButtonDown(Vec2::new(x, y)));
    }

    pub fn release(&self, x: f32, y: f32) {
        self.send(InputEvent::ButtonUp(Vec2::new(x, y)));
    }
}

/// Create the host→core input channel pair.
pub fn input_channel() -> (InputFeed, InputBridge) {
    let (tx, rx) = unbounded();
    (InputFeed { tx }, InputBridge { rx })
}

/// Pointer position as of this tick, for handler code.
pub fn pointer_position(world: &World) -> Vec2 {
    world.resource::<InputFrame>().pointer()
}

pub fn is_key_held(world: &World, key: Key) -> bool {
    world.resource::<InputFrame>().is_held(key)
}

pub fn was_key_just_pressed(world: &World, key: Key) -> bool {
    world.resource::<InputFrame>().just_pressed(key)
}

pub fn was_key_just_released(world: &World, key: Key) -> bool {
    world.resource::<InputFrame>().just_released(key)
}
