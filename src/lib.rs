//! Magic Words
//!
//! Layout and scrolling for dialogue that mixes text with inline glyph
//! images and speaker avatars.
//!
//! The pure core (`parser`, `view_state`) tokenizes dialogue lines, breaks
//! them into positioned elements and drives an inertial scroll offset. The
//! impure shell (`source`, `catalog::loader`, `view`) reads documents,
//! resolves images in the background and draws the result in a terminal.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod view;
pub mod view_state;
