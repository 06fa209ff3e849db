//! Bridge between the egui thread and the refresh scheduler's tokio runtime.

pub mod commands;
pub mod runtime;
