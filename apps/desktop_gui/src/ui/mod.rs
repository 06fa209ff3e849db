//! UI layer: app shell, map canvas, and shared widgets.

pub mod app;
pub mod map;
pub mod widgets;
