//! CLI command handlers
//!
//! This module bridges terminal input with the service layer. The binary
//! parses its own arguments with clap and hands control to a [`Session`].

pub mod session;

pub use session::{Flow, Session};
