//! Snake on a toroidal grid.
//!
//! The core (`grid`, `snake`, `food`, `game`) is a tick-driven state engine with no
//! timer or I/O of its own. The terminal front-end (`renderer`, `ui`, `terminal_runtime`)
//! and the `leaderboard` store are thin collaborators driven by the binary.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod leaderboard;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
