//! Executor tasks
//!
//! Each task takes its resource group, builds the hardware collaborator and hands it to the
//! matching loop of the core crate.

pub mod blink;
pub mod classify;
pub mod color;
pub mod sensor;
