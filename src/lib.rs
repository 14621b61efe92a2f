//! duopong: two-player terminal Pong.
//!
//! `game` holds the simulation core (state, collisions, per-tick stepping)
//! and is independent of the terminal. `ui` draws a `game::Snapshot` with
//! ratatui, `game_modes` runs the frame loop that ties them together.

pub mod config;
pub mod game;
pub mod game_modes;
pub mod logging;
pub mod ui;
