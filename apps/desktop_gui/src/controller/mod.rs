//! Controller layer: backend events and command orchestration.

pub mod events;
pub mod orchestration;
