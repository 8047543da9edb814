//! Reelscan - movie and TV library scanner
//!
//! This library crate exposes the configuration and library walk for
//! integration testing.

pub mod config;
pub mod scanner;
