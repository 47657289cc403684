//! A/B loop-repeat practice player core.
//!
//! The library holds everything that does not need audio hardware or a
//! terminal: the loop region and its repeat state machine, the five marker
//! slots, drag-gesture mapping and the [`session::Session`] that ties them to
//! a pluggable [`media::MediaBackend`].

pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod media;
pub mod playlist;
pub mod region;
pub mod repeat;
pub mod session;
pub mod slots;
pub mod time;
pub mod tips;
