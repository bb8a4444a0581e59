//! Delta canvas — a pixel-grid drawing surface that ships only changed cells.
//!
//! - `engine`: the drawing session, keeping the visible grid and the pending
//!   change set in lockstep
//! - `sync`: serializing, scheduling and handing off pending changes
//! - `renderer`: full redraws of the grid onto any `Surface`
//! - `editor`: the interactive terminal front end

pub mod config;
pub mod editor;
pub mod engine;
pub mod menubar;
pub mod renderer;
pub mod sync;
pub mod types;
