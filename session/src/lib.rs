//! Probability spinner session library.
//!
//! This module exposes the session components for use in tests and binaries.

pub mod autoplay;
pub mod config;
pub mod controller;
pub mod input;
pub mod render;
pub mod session_loop;
