//! Utilities shared by the officeverse server and client binaries.

pub mod logger;
pub mod time;
