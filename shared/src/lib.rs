//! Core of the probability spinner.
//!
//! Pure game logic shared by every front end: the session store, the four
//! mini-game simulators, the spinner wheel, and the message types exchanged
//! with the presentation layer.

pub mod config;
pub mod game;
pub mod games;
pub mod protocol;
pub mod random;
pub mod spinner;
pub mod stats;
