//! Core system components shared by the monitor tasks
pub mod alert;
pub mod band;
pub mod channels;
pub mod collaborator;
pub mod config;
pub mod display_state;
pub mod error;
pub mod sample;
