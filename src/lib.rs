//! Lunar Lander Extended - terminal side-scrolling arcade game.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod app;
pub mod audio;
pub mod cli;
pub mod core;
pub mod game;
pub mod input;
pub mod maze;
pub mod ui;
pub mod utils;
