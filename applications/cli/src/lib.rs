//! Musa command line
//!
//! Composition root for playlist management without audio output: the
//! playback manager is wired to the SQLite document store and a
//! [`LibraryPlayer`](headless::LibraryPlayer) that only reads tags.

pub mod commands;
pub mod config;
pub mod error;
pub mod headless;
