//! Pure domain types with minimal dependencies
//!
//! Types here have no rendering, I/O or async dependencies so that every
//! other module can share them.

pub mod fit;
pub mod geometry;
pub mod monitor;
pub mod view;

pub use fit::*;
pub use geometry::*;
pub use monitor::*;
pub use view::*;
