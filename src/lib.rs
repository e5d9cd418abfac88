//! Tilt-controlled terminal Snake.
//!
//! The snake is steered by tilting an accelerometer wired to an I2C bus
//! (or by the keyboard). The crate is split along the seams of that
//! pipeline: [`sensor`] reads raw tilt samples, [`tilt`] maps them to
//! headings, [`engine`] advances the game one tick at a time, and
//! [`renderer`] draws the resulting snapshot.

pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod sensor;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod tilt;
pub mod ui;
