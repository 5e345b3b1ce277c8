//! Task implementations
//!
//! Each task is a struct owning its collaborator and its task-local state, plus an endless
//! `run` loop. The firmware wraps the loops in `#[embassy_executor::task]` functions.
pub mod acquire;
pub mod blink;
pub mod classify;
pub mod color;
