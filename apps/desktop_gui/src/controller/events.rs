//! Backend -> UI status events. Rendered views travel separately through a watch slot.

pub enum UiEvent {
    Info(String),
    /// The worker could not start; no further renders will arrive.
    BackendFailed(String),
}
