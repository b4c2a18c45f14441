//! Operator CLI for building payload command packets.

pub mod cli;
