//! Terminal chat client for the officeverse chat channel.
//!
//! Registers a player ID, relays typed lines as global or private chat and
//! renders everything the server pushes.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
