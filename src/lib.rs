//! Self-sustaining fireworks display: rockets ascend, burst into fading
//! particle trails, and relaunch forever.
//!
//! The simulation core ([`firework`]) owns no terminal state; it draws
//! through the [`canvas::Canvas`] surface, which the binary implements on a
//! raw-mode terminal and tests implement as a recording stub.

pub mod canvas;
pub mod color;
pub mod firework;
