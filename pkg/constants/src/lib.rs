//! Centralized constants for the cluster upgrade client.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod health;
pub mod network;
pub mod paths;
pub mod upgrade;
