//! setgallery - image set gallery widget for the browser
//!
//! A grid of image sets fetched from a JSON API, filterable by tag, with a
//! lightbox for viewing a set's images with zoom, drag-pan, fullscreen and
//! thumbnail navigation.
//!
//! The state machines are plain Rust and build on any target; the DOM
//! bindings only exist on `wasm32`.

pub mod api;
pub mod config;
pub mod forms;
pub mod keybindings;
pub mod lightbox;
pub mod model;
pub mod transform;
pub mod ui_constants;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
