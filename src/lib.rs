//! Two-player chess: rules engine, game controller, notation, persistence
//! and a plain-text board renderer.

pub mod game;
pub mod ui;
