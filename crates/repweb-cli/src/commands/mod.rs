// crates/repweb-cli/src/commands/mod.rs
//
// Command module declarations for the repweb CLI.

pub mod connection;
pub mod info;
pub mod join;
pub mod players;
pub mod trust;
