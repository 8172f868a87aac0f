//! Preview session module
//!
//! This module contains:
//! - Session state and its mutation methods
//! - Input message types
//! - The pan/zoom interaction controller

pub mod interaction;
pub mod messages;
pub mod state;

pub use messages::Msg;
pub use state::Session;
