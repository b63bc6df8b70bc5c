//! Shared plumbing for the lesson programs in `src/bin`.
//!
//! Every lesson opens a window through [`window::Window`], wraps its GL
//! objects with the types in [`render_gl`] and runs a clear/draw/swap loop.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate gl;
extern crate sdl2;

pub mod debug;
pub mod logging;
pub mod render_gl;
pub mod resources;
pub mod window;
