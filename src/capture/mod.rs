//! Input collaborators
//!
//! This module consolidates:
//! - Source image decoding (image.rs)
//! - Monitor layout parsing (layout.rs)

pub mod image;
pub mod layout;
