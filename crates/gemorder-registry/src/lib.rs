//! Interaction with the RubyGems registry through the local `gem` tool:
//! subprocess invocation, `gem dependency` output parsing, version
//! requirement matching, and gem existence probing.

pub mod client;
pub mod config;
pub mod metadata;
pub mod probe;
pub mod version;
