//! Operator CLI for issuing and checking prefixed API keys.

pub mod cli;
