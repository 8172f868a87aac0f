//! Rendering module
//!
//! This module contains:
//! - Coordinate transforms shared between the preview and export (geometry.rs)
//! - The drawing surface abstraction and its tiny-skia backend (surface.rs)
//! - Preview composition and fit annotations (preview.rs)

pub mod geometry;
pub mod preview;
pub mod surface;
